use crate::error::ConvertError;
use crate::job::EncodeSettings;
use image::{DynamicImage, ImageError};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// How encoded bytes reach the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write straight to the destination. A crash mid-write can leave a
    /// truncated file behind.
    #[default]
    Direct,
    /// Write to a temp file in the destination directory, then rename it over
    /// the destination.
    Atomic,
}

/// Decode `source`, encode it as lossy WebP and write it to `dest`.
pub fn convert_to_webp(
    source: &Path,
    dest: &Path,
    settings: &EncodeSettings,
    write_mode: WriteMode,
) -> Result<PathBuf, ConvertError> {
    let img = decode(source)?;
    let bytes = encode_webp(&img, settings)?;
    drop(img);

    write_output(dest, &bytes, write_mode)?;
    debug!(
        "Encoded {} -> {} ({} bytes, q={}, m={})",
        source.display(),
        dest.display(),
        bytes.len(),
        settings.quality,
        settings.method
    );
    Ok(dest.to_path_buf())
}

fn decode(source: &Path) -> Result<DynamicImage, ConvertError> {
    let reader = image::ImageReader::open(source).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ConvertError::SourceNotFound(source.to_path_buf()),
        _ => ConvertError::Decode(ImageError::IoError(err)),
    })?;
    // Sniff the real format so a mislabelled JPEG still decodes
    let reader = reader
        .with_guessed_format()
        .map_err(|err| ConvertError::Decode(ImageError::IoError(err)))?;
    Ok(reader.decode()?)
}

/// Encode to lossy WebP. Images with alpha keep it; everything else goes
/// through 8-bit RGB.
pub fn encode_webp(
    img: &DynamicImage,
    settings: &EncodeSettings,
) -> Result<Vec<u8>, ConvertError> {
    let mut config = webp::WebPConfig::new()
        .map_err(|_| ConvertError::Encode("unable to initialise encoder config".to_string()))?;
    config.lossless = 0;
    config.quality = settings.quality as f32;
    config.method = settings.method as i32;

    let (width, height) = (img.width(), img.height());
    let memory = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_advanced(&config)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_advanced(&config)
    }
    .map_err(|err| ConvertError::Encode(format!("{:?}", err)))?;

    Ok(memory.to_vec())
}

fn write_output(dest: &Path, bytes: &[u8], write_mode: WriteMode) -> Result<(), ConvertError> {
    let write_err = |source: io::Error| ConvertError::Write {
        path: dest.to_path_buf(),
        source,
    };

    match write_mode {
        WriteMode::Direct => fs::write(dest, bytes).map_err(write_err),
        WriteMode::Atomic => {
            let dir = match dest.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
            tmp.write_all(bytes).map_err(write_err)?;
            tmp.as_file().sync_all().map_err(write_err)?;
            tmp.persist(dest).map_err(|err| write_err(err.error))?;
            Ok(())
        }
    }
}
