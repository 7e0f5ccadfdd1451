//! The `preview` command: serve an existing build, nothing else.

use anyhow::{Result, bail};

use crate::config::PipelineConfig;
use crate::serve;

pub fn run(config: &PipelineConfig) -> Result<()> {
    let output = config.output_root();
    if !output.is_dir() {
        bail!(
            "output directory {} not found - run `rill build` first",
            output.display()
        );
    }

    let server = serve::bind_server(config)?;
    server.run(output, None)
}
