//! Image pathway: re-encode a local image into another format
//!
//! Decoding and encoding go through an [`ImageCodec`]; the production codec
//! is backed by the `image` crate. Two rules apply on top of a plain
//! re-encode:
//!
//! - JPEG targets cannot carry transparency, so sources with an alpha
//!   channel (or any layout other than 8-bit RGB/gray) are flattened to RGB
//!   first.
//! - ICO targets are written as a multi-resolution icon holding exactly the
//!   [`ICON_SIZES`] frames, whatever the source dimensions.

use crate::core::conversion::ConversionJob;
use crate::core::AppPaths;
use crate::error::{ConvertorError, Result};
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ExtendedColorType, ImageFormat, ImageReader, ImageResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Square frame sizes embedded in generated icons
pub const ICON_SIZES: [u32; 3] = [16, 32, 48];

/// Capability to re-encode an image file into `target` format
pub trait ImageCodec {
    fn encode(&self, input: &Path, output: &Path, target: &str) -> Result<()>;
}

/// [`ImageCodec`] backed by the `image` crate
#[derive(Debug, Default)]
pub struct ImageCrateCodec;

impl ImageCodec for ImageCrateCodec {
    fn encode(&self, input: &Path, output: &Path, target: &str) -> Result<()> {
        // Content sniffing tolerates files whose extension lies
        let img = ImageReader::open(input)?.with_guessed_format()?.decode()?;

        if target.eq_ignore_ascii_case("ico") {
            return write_icon(&img, output);
        }

        let format = ImageFormat::from_extension(target)
            .ok_or_else(|| ConvertorError::invalid_input(format!("Unsupported image format '{}'", target)))?;

        let img = if is_jpeg_family(target) {
            flatten_for_jpeg(img)
        } else {
            img
        };

        img.save_with_format(output, format)?;
        Ok(())
    }
}

/// Convert `job.input` next to itself, returning the written file
pub fn convert_image(paths: &AppPaths, codec: &dyn ImageCodec, job: &ConversionJob) -> Result<PathBuf> {
    let input = job.resolve_input(paths)?;
    let output = job.output_path(&input);

    log::info!("Converting {:?} -> {:?}", input, output);

    codec.encode(&input, &output, &job.target_format)?;

    Ok(output)
}

pub fn is_jpeg_family(target: &str) -> bool {
    matches!(target.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "jpe" | "jfif")
}

/// Drop alpha (and anything the JPEG encoder cannot take) by going through RGB8
fn flatten_for_jpeg(img: DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::Rgb8 | ColorType::L8 => img,
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}

fn write_icon(img: &DynamicImage, output: &Path) -> Result<()> {
    let frames = ICON_SIZES
        .iter()
        .map(|&size| {
            let frame = img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8();
            IcoFrame::as_png(frame.as_raw(), size, size, ExtendedColorType::Rgba8)
        })
        .collect::<ImageResult<Vec<_>>>()?;

    let mut writer = BufWriter::new(File::create(output)?);
    IcoEncoder::new(&mut writer).encode_images(&frames)?;
    writer.flush()?;

    Ok(())
}

/// Frame dimensions listed in an ICO file's directory
pub fn icon_sizes(path: &Path) -> Result<Vec<(u32, u32)>> {
    let data = fs::read(path)?;

    let invalid = || ConvertorError::other(format!("'{}' is not a valid icon file", path.display()));

    if data.len() < 6 || data[0..2] != [0, 0] || data[2..4] != [1, 0] {
        return Err(invalid());
    }

    let count = u16::from_le_bytes([data[4], data[5]]) as usize;
    let mut sizes = Vec::with_capacity(count);

    for index in 0..count {
        let offset = 6 + index * 16;
        let entry = data.get(offset..offset + 16).ok_or_else(invalid)?;
        // A stored 0 means 256
        let dimension = |byte: u8| if byte == 0 { 256 } else { byte as u32 };
        sizes.push((dimension(entry[0]), dimension(entry[1])));
    }

    Ok(sizes)
}
