//! The `css` task: SCSS compilation and CSS printing.

use std::path::PathBuf;

use super::{TaskContext, TaskError, TaskReport, TaskResult, write_output};
use crate::core::AssetCategory;
use crate::transform::style::{compile_scss, print_css};

pub(super) fn run(ctx: &TaskContext) -> TaskResult {
    let route = ctx.resolver.route(AssetCategory::Css);

    let load_paths: Vec<PathBuf> = ctx
        .config
        .style
        .load_paths
        .iter()
        .map(|p| ctx.config.root.join(p))
        .collect();

    let mut written = 0;
    for entry in ctx.resolver.scan(AssetCategory::Css) {
        // Underscore-prefixed files are partials, compiled only via @use
        if is_partial(&entry) {
            continue;
        }

        let css = compile_scss(&entry, &load_paths)
            .and_then(|css| print_css(&css, ctx.mode.minify))
            .map_err(|m| TaskError::transform(&entry, m))?;

        let dest = route.output_for(&entry).with_extension("css");
        write_output(&dest, css.as_bytes())?;
        written += 1;
    }

    Ok(TaskReport { written })
}

fn is_partial(path: &std::path::Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('_'))
}

#[cfg(test)]
mod tests {
    use crate::config::PipelineConfig;
    use crate::core::BuildMode;
    use crate::task::{Registry, TaskContext, TaskId};
    use std::fs;
    use tempfile::TempDir;

    fn project(sheets: &[(&str, &str)]) -> (TempDir, PipelineConfig) {
        let dir = TempDir::new().unwrap();
        let mut config = PipelineConfig::default();
        config.root = dir.path().to_path_buf();

        for (rel, content) in sheets {
            let path = dir.path().join("src/assets/scss").join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        (dir, config)
    }

    fn run(config: &PipelineConfig, mode: BuildMode) -> crate::task::TaskResult {
        let resolver = config.resolver();
        let ctx = TaskContext::new(config, &resolver, mode);
        let registry = Registry::standard();
        registry.get(TaskId::Css).unwrap().run(&ctx)
    }

    #[test]
    fn test_compiles_entries_skips_partials() {
        let (dir, config) = project(&[
            ("main.scss", "@use 'vars';\nbody { color: vars.$fg; }\n"),
            ("_vars.scss", "$fg: #333;\n"),
        ]);

        let report = run(&config, BuildMode::DEVELOPMENT).unwrap();
        assert_eq!(report.written, 1);

        let out = fs::read_to_string(dir.path().join("dist/assets/css/main.css")).unwrap();
        assert!(out.contains("color"));
        assert!(!dir.path().join("dist/assets/css/_vars.css").exists());
    }

    #[test]
    fn test_build_minifies_dev_does_not() {
        let source = ".a {\n  color: red;\n}\n.b {\n  color: blue;\n}\n";
        let (dir, config) = project(&[("main.scss", source)]);

        run(&config, BuildMode::DEVELOPMENT).unwrap();
        let dev = fs::read_to_string(dir.path().join("dist/assets/css/main.css")).unwrap();

        run(&config, BuildMode::PRODUCTION).unwrap();
        let prod = fs::read_to_string(dir.path().join("dist/assets/css/main.css")).unwrap();

        assert!(prod.len() < dev.len());
        assert!(dev.contains('\n'));
    }

    #[test]
    fn test_malformed_scss_is_transform_error() {
        let (_dir, config) = project(&[("broken.scss", "body { color: ")]);

        let err = run(&config, BuildMode::PRODUCTION).unwrap_err();
        assert!(err.is_transform());
    }
}
