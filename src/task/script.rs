//! The `js` task: entry script processing.

use std::fs;

use super::{TaskContext, TaskError, TaskReport, TaskResult, write_output};
use crate::core::AssetCategory;
use crate::transform::script::process_js;

pub(super) fn run(ctx: &TaskContext) -> TaskResult {
    let route = ctx.resolver.route(AssetCategory::Js);

    let mut written = 0;
    for entry in ctx.resolver.scan(AssetCategory::Js) {
        let source = fs::read_to_string(&entry)?;

        let code = process_js(&source, ctx.mode.minify, ctx.config.script.mangle)
            .map_err(|m| TaskError::transform(&entry, m))?;

        write_output(&route.output_for(&entry), code.as_bytes())?;
        written += 1;
    }

    Ok(TaskReport { written })
}
