//! Structure-preserving copy tasks: `video`, `vendors`, `fonts`.

use super::{TaskContext, TaskReport, TaskResult, copy_output};
use crate::core::AssetCategory;

pub(super) fn run_video(ctx: &TaskContext) -> TaskResult {
    copy_category(ctx, AssetCategory::Video)
}

pub(super) fn run_vendors(ctx: &TaskContext) -> TaskResult {
    copy_category(ctx, AssetCategory::Vendors)
}

pub(super) fn run_fonts(ctx: &TaskContext) -> TaskResult {
    copy_category(ctx, AssetCategory::Fonts)
}

fn copy_category(ctx: &TaskContext, category: AssetCategory) -> TaskResult {
    let route = ctx.resolver.route(category);

    let mut written = 0;
    for source in ctx.resolver.scan(category) {
        copy_output(&source, &route.output_for(&source))?;
        written += 1;
    }

    Ok(TaskReport { written })
}

#[cfg(test)]
mod tests {
    use crate::config::PipelineConfig;
    use crate::core::BuildMode;
    use crate::task::{Registry, TaskContext, TaskId};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_copies_preserve_structure() {
        let dir = TempDir::new().unwrap();
        let mut config = PipelineConfig::default();
        config.root = dir.path().to_path_buf();

        let fonts = dir.path().join("src/assets/fonts");
        fs::create_dir_all(fonts.join("display")).unwrap();
        fs::write(fonts.join("body.woff2"), b"font").unwrap();
        fs::write(fonts.join("display/head.woff2"), b"font").unwrap();

        let resolver = config.resolver();
        let ctx = TaskContext::new(&config, &resolver, BuildMode::PRODUCTION);
        let registry = Registry::standard();
        let report = registry.get(TaskId::Fonts).unwrap().run(&ctx).unwrap();

        assert_eq!(report.written, 2);
        assert!(dir.path().join("dist/assets/fonts/body.woff2").exists());
        assert!(
            dir.path()
                .join("dist/assets/fonts/display/head.woff2")
                .exists()
        );
    }

    #[test]
    fn test_vendors_filter_extensions() {
        let dir = TempDir::new().unwrap();
        let mut config = PipelineConfig::default();
        config.root = dir.path().to_path_buf();

        let vendors = dir.path().join("src/assets/vendors/lib");
        fs::create_dir_all(&vendors).unwrap();
        fs::write(vendors.join("lib.js"), b"x").unwrap();
        fs::write(vendors.join("lib.css"), b"x").unwrap();
        fs::write(vendors.join("README.md"), b"x").unwrap();

        let resolver = config.resolver();
        let ctx = TaskContext::new(&config, &resolver, BuildMode::DEVELOPMENT);
        let registry = Registry::standard();
        let report = registry.get(TaskId::Vendors).unwrap().run(&ctx).unwrap();

        assert_eq!(report.written, 2);
        assert!(!dir.path().join("dist/assets/vendors/lib/README.md").exists());
    }

    #[test]
    fn test_empty_category_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut config = PipelineConfig::default();
        config.root = dir.path().to_path_buf();

        let resolver = config.resolver();
        let ctx = TaskContext::new(&config, &resolver, BuildMode::DEVELOPMENT);
        let registry = Registry::standard();
        let report = registry.get(TaskId::Video).unwrap().run(&ctx).unwrap();

        assert_eq!(report.written, 0);
    }
}
