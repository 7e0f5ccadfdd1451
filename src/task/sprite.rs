//! The `svg` task: sprite assembly from `img/svg/` icons.

use std::fs;
use std::path::Path;

use super::{TaskContext, TaskError, TaskReport, TaskResult, write_output};
use crate::core::AssetCategory;
use crate::transform::sprite::{SpriteIcon, build_sprite};

pub(super) fn run(ctx: &TaskContext) -> TaskResult {
    let route = ctx.resolver.route(AssetCategory::Svg);

    let sources = ctx.resolver.scan(AssetCategory::Svg);
    if sources.is_empty() {
        return Ok(TaskReport::default());
    }

    let mut icons = Vec::with_capacity(sources.len());
    for source in &sources {
        let content = fs::read_to_string(source)?;
        icons.push(SpriteIcon {
            id: symbol_id(source, &route.source_dir),
            content,
        });
    }

    let sprite =
        build_sprite(&icons).map_err(|m| TaskError::transform(&route.source_dir, m))?;

    write_output(&route.output_dir.join("sprite.svg"), sprite.as_bytes())?;
    Ok(TaskReport { written: 1 })
}

/// Symbol id from the icon's path inside the sprite tree:
/// `social/twitter.svg` → `social-twitter`.
fn symbol_id(source: &Path, base: &Path) -> String {
    let rel = source.strip_prefix(base).unwrap_or(source);
    let stem = rel.with_extension("");

    let mut id = String::new();
    for part in stem.iter() {
        if !id.is_empty() {
            id.push('-');
        }
        for ch in part.to_string_lossy().chars() {
            id.push(if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '-'
            });
        }
    }
    id
}
