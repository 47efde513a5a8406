//! Image writers: plain-text PPM or anything the image crate encodes.

use anyhow::Result;
use glint_renderer::Film;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the film to `path`, picking the encoder from the extension:
/// `.ppm` writes plain text P3, anything else goes through the image
/// crate.
pub fn write(path: &str, film: &Film) -> Result<()> {
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("ppm") => write_ppm(path, film),
        _ => write_image(path, film),
    }
}

/// Plain-text PPM: `P3`, dimensions, 255, then one RGB triple per line.
fn write_ppm(path: &str, film: &Film) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "P3")?;
    writeln!(out, "{} {}", film.width, film.height)?;
    writeln!(out, "255")?;
    for rgb in film.to_rgb8().chunks_exact(3) {
        writeln!(out, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }
    out.flush()?;
    Ok(())
}

/// Encode through the image crate (PNG, and whatever else it infers from
/// the extension).
fn write_image(path: &str, film: &Film) -> Result<()> {
    let buffer = image::RgbImage::from_raw(film.width, film.height, film.to_rgb8())
        .ok_or_else(|| anyhow::anyhow!("film dimensions do not match pixel buffer"))?;
    buffer.save(path)?;
    Ok(())
}
