//! The `build` command: clean, build minified, exit.

use anyhow::Result;

use crate::config::PipelineConfig;
use crate::graph::{Pipeline, run_pipeline};
use crate::task::{Registry, TaskContext};

pub fn run(config: &PipelineConfig) -> Result<()> {
    let resolver = config.resolver();
    let registry = Registry::standard();
    let pipeline = Pipeline::build();

    // No event publisher: the build pipeline cannot notify clients
    let ctx = TaskContext::new(config, &resolver, pipeline.mode);
    run_pipeline(&pipeline, &registry, &ctx)?;
    Ok(())
}
