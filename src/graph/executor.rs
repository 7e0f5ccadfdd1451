//! Pipeline execution over the validated task graph.
//!
//! States: `idle → cleaning → running-tasks`, then the caller either enters
//! the serve loop (dev) or exits (build). Each stage is executed on the
//! rayon pool and joined before the next stage starts.

use std::time::Instant;

use anyhow::{Result, bail};
use rayon::prelude::*;

use super::TaskGraph;
use crate::core::BuildMode;
use crate::log;
use crate::logger::status_error;
use crate::task::{Registry, TaskContext, TaskError, TaskId, TaskResult};
use crate::utils::plural::plural_count;

/// A named composition of tasks with its execution mode.
pub struct Pipeline {
    pub name: &'static str,
    pub graph: TaskGraph,
    pub mode: BuildMode,
}

impl Pipeline {
    /// Development pipeline: readable output, live reload, per-task
    /// recovery.
    pub fn dev() -> Self {
        Self {
            name: "dev",
            graph: TaskGraph::standard(),
            mode: BuildMode::DEVELOPMENT,
        }
    }

    /// Production pipeline: minified output, fail fast.
    pub fn build() -> Self {
        Self {
            name: "build",
            graph: TaskGraph::standard(),
            mode: BuildMode::PRODUCTION,
        }
    }
}

/// What a pipeline run produced.
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    /// Output files written across all tasks.
    pub written: usize,
    /// Tasks that failed but were recovered (development only).
    pub recovered: Vec<(TaskId, TaskError)>,
}

/// Run a pipeline to completion.
///
/// Error policy follows the task-error taxonomy: I/O failures abort in
/// both modes; transform failures abort in production and are reported
/// and recorded in development.
pub fn run_pipeline(
    pipeline: &Pipeline,
    registry: &Registry,
    ctx: &TaskContext,
) -> Result<PipelineOutcome> {
    debug_assert!(ctx.mode == pipeline.mode);

    pipeline.graph.validate(registry)?;
    let stages = pipeline.graph.stages()?;

    let started = Instant::now();
    let mut outcome = PipelineOutcome::default();

    for stage in stages {
        crate::debug!(pipeline.name; "stage: {}", stage_label(&stage));

        let results: Vec<(TaskId, TaskResult)> = stage
            .par_iter()
            .map(|id| (*id, run_one(registry, *id, ctx)))
            .collect();

        for (id, result) in results {
            match result {
                Ok(report) => {
                    outcome.written += report.written;
                    if report.written > 0 {
                        crate::debug!(pipeline.name; "{}: {}", id, plural_count(report.written, "file"));
                    }
                }
                Err(err) if err.is_transform() && !ctx.mode.fail_fast => {
                    // Recover locally: report and keep the other
                    // categories building
                    status_error(&format!("{id} task failed"), &err.to_string());
                    outcome.recovered.push((id, err));
                }
                Err(err) => bail!("task `{id}` failed: {err}"),
            }
        }
    }

    if !outcome.recovered.is_empty() {
        log!(
            pipeline.name;
            "{} failed and were skipped",
            plural_count(outcome.recovered.len(), "task")
        );
    }
    log!(
        pipeline.name;
        "{} in {}ms",
        plural_count(outcome.written, "file"),
        started.elapsed().as_millis()
    );

    Ok(outcome)
}

fn run_one(registry: &Registry, id: TaskId, ctx: &TaskContext) -> TaskResult {
    match registry.get(id) {
        Some(task) => task.run(ctx),
        // validate() already rejected this; defensive for custom graphs
        None => Err(TaskError::Io(std::io::Error::other(format!(
            "task `{id}` is not registered"
        )))),
    }
}

fn stage_label(stage: &[TaskId]) -> String {
    stage
        .iter()
        .map(|id| id.label())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// A small but category-complete project.
    fn project() -> (TempDir, PipelineConfig) {
        let dir = TempDir::new().unwrap();
        let mut config = PipelineConfig::default();
        config.root = dir.path().to_path_buf();

        let src = dir.path().join("src");
        for sub in [
            "assets/html",
            "assets/scss",
            "assets/js",
            "assets/img/svg",
            "assets/fonts",
            "assets/vendors",
            "assets/video",
        ] {
            fs::create_dir_all(src.join(sub)).unwrap();
        }

        fs::write(
            src.join("index.html"),
            "<html>\n  @include('assets/html/head.html')\n  <body>\n    <h1>Hi</h1>\n  </body>\n</html>\n",
        )
        .unwrap();
        fs::write(
            src.join("assets/html/head.html"),
            "<head><title>demo</title></head>",
        )
        .unwrap();
        fs::write(
            src.join("assets/scss/main.scss"),
            "$fg: #222;\nbody {\n  color: $fg;\n  .x { margin: 0; }\n}\n",
        )
        .unwrap();
        fs::write(
            src.join("assets/js/main.js"),
            "const answer = 40 + 2;\nconsole.log(answer);\n",
        )
        .unwrap();
        fs::write(
            src.join("assets/img/svg/dot.svg"),
            r#"<svg viewBox="0 0 4 4"><circle r="2"/></svg>"#,
        )
        .unwrap();
        fs::write(src.join("assets/fonts/body.woff2"), b"font").unwrap();
        fs::write(src.join("assets/vendors/lib.js"), b"var lib = 1;").unwrap();
        fs::write(src.join("assets/video/clip.mp4"), b"video").unwrap();

        let img = image::RgbaImage::from_pixel(6, 6, image::Rgba([1, 2, 3, 255]));
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_with_encoder(image::codecs::png::PngEncoder::new(&mut png))
            .unwrap();
        fs::write(src.join("assets/img/dot.png"), png).unwrap();

        (dir, config)
    }

    fn run(config: &PipelineConfig, pipeline: &Pipeline) -> Result<PipelineOutcome> {
        let resolver = config.resolver();
        let ctx = TaskContext::new(config, &resolver, pipeline.mode);
        run_pipeline(pipeline, &Registry::standard(), &ctx)
    }

    fn read_tree(root: &Path) -> Vec<(String, Vec<u8>)> {
        let mut files: Vec<(String, Vec<u8>)> = jwalk::WalkDir::new(root)
            .into_iter()
            .flatten()
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let path = e.path();
                let rel = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
                (rel, fs::read(&path).unwrap())
            })
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_build_covers_every_category() {
        let (dir, config) = project();
        run(&config, &Pipeline::build()).unwrap();

        let dist = dir.path().join("dist");
        assert!(dist.join("index.html").exists());
        assert!(dist.join("assets/css/main.css").exists());
        assert!(dist.join("assets/js/main.js").exists());
        assert!(dist.join("assets/img/dot.png").exists());
        assert!(dist.join("assets/img/webp/dot.webp").exists());
        assert!(dist.join("assets/img/svg/sprite.svg").exists());
        assert!(dist.join("assets/fonts/body.woff2").exists());
        assert!(dist.join("assets/vendors/lib.js").exists());
        assert!(dist.join("assets/video/clip.mp4").exists());
    }

    #[test]
    fn test_build_twice_is_byte_identical() {
        let (dir, config) = project();

        run(&config, &Pipeline::build()).unwrap();
        let first = read_tree(&dir.path().join("dist"));

        run(&config, &Pipeline::build()).unwrap();
        let second = read_tree(&dir.path().join("dist"));

        assert_eq!(first, second);
    }

    #[test]
    fn test_build_compressible_output_not_larger_than_dev() {
        let (dir, config) = project();

        run(&config, &Pipeline::dev()).unwrap();
        let dev_css = fs::read(dir.path().join("dist/assets/css/main.css")).unwrap();
        let dev_html = fs::read(dir.path().join("dist/index.html")).unwrap();
        let dev_js = fs::read(dir.path().join("dist/assets/js/main.js")).unwrap();

        run(&config, &Pipeline::build()).unwrap();
        let build_css = fs::read(dir.path().join("dist/assets/css/main.css")).unwrap();
        let build_html = fs::read(dir.path().join("dist/index.html")).unwrap();
        let build_js = fs::read(dir.path().join("dist/assets/js/main.js")).unwrap();

        assert!(build_css.len() <= dev_css.len());
        assert!(build_html.len() <= dev_html.len());
        assert!(build_js.len() <= dev_js.len());
    }

    #[test]
    fn test_clean_removes_stale_files_first() {
        let (dir, config) = project();

        let stale = dir.path().join("dist/assets/removed/old.txt");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "stale").unwrap();

        run(&config, &Pipeline::build()).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn test_malformed_stylesheet_dev_recovers_build_fails() {
        let (dir, config) = project();
        fs::write(
            dir.path().join("src/assets/scss/main.scss"),
            "body { color: ",
        )
        .unwrap();

        // dev: other categories still build, the failure is recorded
        let outcome = run(&config, &Pipeline::dev()).unwrap();
        assert_eq!(outcome.recovered.len(), 1);
        assert_eq!(outcome.recovered[0].0, TaskId::Css);
        assert!(dir.path().join("dist/index.html").exists());
        assert!(!dir.path().join("dist/assets/css/main.css").exists());

        // build: the whole invocation fails, no css output claims success
        assert!(run(&config, &Pipeline::build()).is_err());
        assert!(!dir.path().join("dist/assets/css/main.css").exists());
    }

    #[test]
    fn test_outputs_stay_in_category_destinations() {
        let (dir, config) = project();
        run(&config, &Pipeline::build()).unwrap();

        let dist = dir.path().join("dist");
        for (rel, _) in read_tree(&dist) {
            let owned = rel == "index.html"
                || rel.starts_with("assets/css/")
                || rel.starts_with("assets/js/")
                || rel.starts_with("assets/img/")
                || rel.starts_with("assets/video/")
                || rel.starts_with("assets/vendors/")
                || rel.starts_with("assets/fonts/");
            assert!(owned, "unexpected output location: {rel}");
        }
    }
}
