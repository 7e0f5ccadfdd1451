//! Asset category definitions.
//!
//! A category identifies one slice of the source tree with its own output
//! subtree and rebuild task. Categories are static: the full set is known
//! at compile time and configuration only relocates their roots.

use serde::{Deserialize, Serialize};

/// Logical asset category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// Top-level pages plus `@include` partials.
    Html,
    /// SCSS stylesheets.
    Css,
    /// Entry scripts.
    Js,
    /// Raster images and standalone SVG files.
    Img,
    /// Video files, copied as-is.
    Video,
    /// Sprite source icons (`img/svg/` subtree).
    Svg,
    /// Third-party css/js, copied as-is.
    Vendors,
    /// Font files, copied as-is.
    Fonts,
}

impl AssetCategory {
    /// All categories, in classification order: directory-scoped matchers
    /// first (svg before img, since the sprite sources nest inside the
    /// image tree), the extension-only html matcher last.
    pub const ALL: [Self; 8] = [
        Self::Svg,
        Self::Vendors,
        Self::Fonts,
        Self::Video,
        Self::Img,
        Self::Css,
        Self::Js,
        Self::Html,
    ];

    /// Short lowercase label used in logs and config.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::Js => "js",
            Self::Img => "img",
            Self::Video => "video",
            Self::Svg => "svg",
            Self::Vendors => "vendors",
            Self::Fonts => "fonts",
        }
    }

    /// Whether a rebuild of this category can be applied to connected
    /// clients by swapping stylesheets instead of a full page reload.
    pub const fn reloads_styles_only(&self) -> bool {
        matches!(self, Self::Css)
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
