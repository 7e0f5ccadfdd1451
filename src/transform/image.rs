//! Raster image transforms: production re-encoding and WebP generation.

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;

/// Re-encode a raster image for production output.
///
/// JPEG is re-encoded at the configured quality; PNG is re-encoded with
/// the strongest compression. Other formats pass through unchanged.
pub fn optimize(data: &[u8], ext: &str, jpeg_quality: u8) -> Result<Vec<u8>, String> {
    match ext {
        "jpg" | "jpeg" => reencode_jpeg(data, jpeg_quality),
        "png" => reencode_png(data),
        _ => Ok(data.to_vec()),
    }
}

fn reencode_jpeg(data: &[u8], quality: u8) -> Result<Vec<u8>, String> {
    let img = decode(data)?;
    // JPEG has no alpha channel
    let img = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    img.write_with_encoder(encoder).map_err(|e| e.to_string())?;
    Ok(out)
}

fn reencode_png(data: &[u8]) -> Result<Vec<u8>, String> {
    let img = decode(data)?;

    let mut out = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive);
    img.write_with_encoder(encoder).map_err(|e| e.to_string())?;
    Ok(out)
}

/// Encode a JPEG/PNG source as lossless WebP.
pub fn encode_webp(data: &[u8]) -> Result<Vec<u8>, String> {
    let img = decode(data)?;
    // The WebP encoder accepts 8-bit RGB/RGBA only
    let img = match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
        other => DynamicImage::ImageRgba8(other.to_rgba8()),
    };

    let mut out = Vec::new();
    let encoder = WebPEncoder::new_lossless(&mut out);
    img.write_with_encoder(encoder).map_err(|e| e.to_string())?;
    Ok(out)
}

fn decode(data: &[u8]) -> Result<DynamicImage, String> {
    image::load_from_memory(data).map_err(|e| e.to_string())
}
