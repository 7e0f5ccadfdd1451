//! The `html` task: include expansion, then optional minification.

use std::fs;

use super::{TaskContext, TaskError, TaskReport, TaskResult, write_output};
use crate::core::AssetCategory;
use crate::transform::markup::IncludeExpander;
use crate::utils::html::collapse_whitespace;

pub(super) fn run(ctx: &TaskContext) -> TaskResult {
    let route = ctx.resolver.route(AssetCategory::Html);
    let expander = IncludeExpander::new(&ctx.config.markup.include_prefix);

    let mut written = 0;
    for page in ctx.resolver.scan(AssetCategory::Html) {
        let source = fs::read_to_string(&page)?;
        let dir = page.parent().unwrap_or(&route.source_dir);

        let expanded = expander
            .expand(&source, dir)
            .map_err(|m| TaskError::transform(&page, m))?;

        let markup = if ctx.mode.minify {
            collapse_whitespace(&expanded)
        } else {
            expanded
        };

        write_output(&route.output_for(&page), markup.as_bytes())?;
        written += 1;
    }

    Ok(TaskReport { written })
}
