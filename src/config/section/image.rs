//! `[image]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [image]
//! jpeg_quality = 80    # Production JPEG re-encode quality (1-100)
//! webp = true          # Generate WebP copies of raster images
//! ```

use serde::Deserialize;

/// Image processing settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// JPEG re-encode quality for production builds (1-100).
    pub jpeg_quality: u8,

    /// Generate WebP copies of JPEG/PNG sources under `img/webp/`.
    pub webp: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 80,
            webp: true,
        }
    }
}

impl ImageConfig {
    /// Quality clamped to the encoder's accepted range.
    pub fn clamped_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}
