//! The `img` and `webp` tasks.
//!
//! `img` mirrors raster images and standalone SVGs into the output tree
//! (re-encoded in production, copied in development). `webp` additionally
//! encodes every JPEG/PNG source as WebP under `img/webp/`, preserving
//! relative subpaths.

use std::fs;
use std::path::Path;

use super::{TaskContext, TaskError, TaskReport, TaskResult, copy_output, write_output};
use crate::core::AssetCategory;
use crate::transform::image::{encode_webp, optimize};

pub(super) fn run_img(ctx: &TaskContext) -> TaskResult {
    let route = ctx.resolver.route(AssetCategory::Img);

    let mut written = 0;
    for source in ctx.resolver.scan(AssetCategory::Img) {
        let dest = route.output_for(&source);
        let ext = extension(&source);

        if ctx.mode.minify && is_raster(&ext) {
            let data = fs::read(&source)?;
            let optimized = optimize(&data, &ext, ctx.config.image.clamped_jpeg_quality())
                .map_err(|m| TaskError::transform(&source, m))?;
            write_output(&dest, &optimized)?;
        } else {
            // Development copies as-is; SVG always passes through
            copy_output(&source, &dest)?;
        }
        written += 1;
    }

    Ok(TaskReport { written })
}

pub(super) fn run_webp(ctx: &TaskContext) -> TaskResult {
    if !ctx.config.image.webp {
        return Ok(TaskReport::default());
    }

    let route = ctx.resolver.route(AssetCategory::Img);
    let webp_root = route.output_dir.join("webp");

    let mut written = 0;
    for source in ctx.resolver.scan(AssetCategory::Img) {
        if !is_raster(&extension(&source)) {
            continue;
        }

        let rel = source
            .strip_prefix(&route.source_dir)
            .unwrap_or_else(|_| Path::new(""));
        let dest = webp_root.join(rel).with_extension("webp");

        let data = fs::read(&source)?;
        let encoded = encode_webp(&data).map_err(|m| TaskError::transform(&source, m))?;
        write_output(&dest, &encoded)?;
        written += 1;
    }

    Ok(TaskReport { written })
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn is_raster(ext: &str) -> bool {
    matches!(ext, "jpg" | "jpeg" | "png")
}

#[cfg(test)]
mod tests {
    use crate::config::PipelineConfig;
    use crate::core::BuildMode;
    use crate::task::{Registry, TaskContext, TaskId};
    use image::DynamicImage;
    use image::codecs::png::PngEncoder;
    use std::fs;
    use tempfile::TempDir;

    fn sample_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([10, 200, 30, 255]));
        let mut out = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_with_encoder(PngEncoder::new(&mut out))
            .unwrap();
        out
    }

    fn project() -> (TempDir, PipelineConfig) {
        let dir = TempDir::new().unwrap();
        let mut config = PipelineConfig::default();
        config.root = dir.path().to_path_buf();

        let img_dir = dir.path().join("src/assets/img");
        fs::create_dir_all(img_dir.join("photos")).unwrap();
        fs::create_dir_all(img_dir.join("svg")).unwrap();
        fs::write(img_dir.join("photos/dot.png"), sample_png()).unwrap();
        fs::write(img_dir.join("logo.svg"), "<svg viewBox=\"0 0 1 1\"/>").unwrap();
        fs::write(img_dir.join("svg/icon.svg"), "<svg viewBox=\"0 0 1 1\"/>").unwrap();
        (dir, config)
    }

    fn run(config: &PipelineConfig, id: TaskId, mode: BuildMode) -> crate::task::TaskResult {
        let resolver = config.resolver();
        let ctx = TaskContext::new(config, &resolver, mode);
        let registry = Registry::standard();
        registry.get(id).unwrap().run(&ctx)
    }

    #[test]
    fn test_img_mirrors_sources_excluding_sprite_tree() {
        let (dir, config) = project();

        let report = run(&config, TaskId::Img, BuildMode::DEVELOPMENT).unwrap();
        assert_eq!(report.written, 2);
        assert!(dir.path().join("dist/assets/img/photos/dot.png").exists());
        assert!(dir.path().join("dist/assets/img/logo.svg").exists());
        // sprite sources belong to the svg task
        assert!(!dir.path().join("dist/assets/img/svg/icon.svg").exists());
    }

    #[test]
    fn test_webp_preserves_subpaths() {
        let (dir, config) = project();

        let report = run(&config, TaskId::Webp, BuildMode::DEVELOPMENT).unwrap();
        assert_eq!(report.written, 1);

        let webp = fs::read(dir.path().join("dist/assets/img/webp/photos/dot.webp")).unwrap();
        assert_eq!(&webp[..4], b"RIFF");
    }

    #[test]
    fn test_webp_disabled_writes_nothing() {
        let (dir, mut config) = project();
        config.image.webp = false;

        let report = run(&config, TaskId::Webp, BuildMode::DEVELOPMENT).unwrap();
        assert_eq!(report.written, 0);
        assert!(!dir.path().join("dist/assets/img/webp").exists());
    }

    #[test]
    fn test_production_reencodes_raster() {
        let (dir, config) = project();

        run(&config, TaskId::Img, BuildMode::PRODUCTION).unwrap();
        let out = fs::read(dir.path().join("dist/assets/img/photos/dot.png")).unwrap();
        // still a decodable png
        let img = image::load_from_memory(&out).unwrap();
        assert_eq!(img.width(), 8);
    }

    #[test]
    fn test_corrupt_image_is_transform_error_in_build() {
        let (dir, config) = project();
        fs::write(dir.path().join("src/assets/img/bad.png"), b"not a png").unwrap();

        let err = run(&config, TaskId::Img, BuildMode::PRODUCTION).unwrap_err();
        assert!(err.is_transform());
    }
}
