//! Output directory cleaning.
//!
//! Runs strictly before every other task (a `Before` edge in both
//! pipelines), so no task ever races the delete.

use std::fs;
use std::io;

use super::{TaskContext, TaskError, TaskReport, TaskResult};

pub(super) fn run(ctx: &TaskContext) -> TaskResult {
    let output = ctx.config.output_root();

    // The output tree is fully owned, but never the project root itself
    if output == ctx.config.root {
        return Err(TaskError::Io(io::Error::other(
            "output directory equals project root; refusing to clean",
        )));
    }

    match fs::remove_dir_all(&output) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    fs::create_dir_all(&output)?;

    Ok(TaskReport::default())
}

#[cfg(test)]
mod tests {
    use crate::config::PipelineConfig;
    use crate::core::BuildMode;
    use crate::task::{Registry, TaskContext, TaskId};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_stale_output() {
        let dir = TempDir::new().unwrap();
        let mut config = PipelineConfig::default();
        config.root = dir.path().to_path_buf();

        let stale = dir.path().join("dist/assets/css/old.css");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "body{}").unwrap();

        let resolver = config.resolver();
        let ctx = TaskContext::new(&config, &resolver, BuildMode::PRODUCTION);
        let registry = Registry::standard();
        registry.get(TaskId::Clean).unwrap().run(&ctx).unwrap();

        assert!(!stale.exists());
        assert!(dir.path().join("dist").is_dir());
    }

    #[test]
    fn test_clean_tolerates_missing_output() {
        let dir = TempDir::new().unwrap();
        let mut config = PipelineConfig::default();
        config.root = dir.path().to_path_buf();

        let resolver = config.resolver();
        let ctx = TaskContext::new(&config, &resolver, BuildMode::DEVELOPMENT);
        let registry = Registry::standard();
        registry.get(TaskId::Clean).unwrap().run(&ctx).unwrap();

        assert!(dir.path().join("dist").is_dir());
    }
}
