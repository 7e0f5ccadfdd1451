//! Task Registry: named, independently invokable build steps.
//!
//! Each task reads the files of one category, applies its transform chain
//! and writes into that category's output subtree. Tasks hold no state
//! between invocations; everything they need arrives in the [`TaskContext`].

mod clean;
mod copy;
mod image;
mod markup;
mod script;
mod sprite;
mod style;

use std::fs;
use std::path::{Path, PathBuf};

use crossbeam::channel::Sender;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::PipelineConfig;
use crate::core::{AssetCategory, BuildMode};
use crate::reload::ChangeEvent;
use crate::resolve::PathResolver;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a registered task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskId {
    Clean,
    Html,
    Css,
    Js,
    Img,
    Webp,
    Svg,
    Video,
    Vendors,
    Fonts,
}

impl TaskId {
    /// Every asset-producing task (everything except `clean`).
    pub const ASSET_TASKS: [Self; 9] = [
        Self::Html,
        Self::Css,
        Self::Js,
        Self::Img,
        Self::Webp,
        Self::Svg,
        Self::Video,
        Self::Vendors,
        Self::Fonts,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Html => "html",
            Self::Css => "css",
            Self::Js => "js",
            Self::Img => "img",
            Self::Webp => "webp",
            Self::Svg => "svg",
            Self::Video => "video",
            Self::Vendors => "vendors",
            Self::Fonts => "fonts",
        }
    }

    /// Category whose output this task refreshes (drives reload
    /// notifications). `webp` derives from image sources, so it reports
    /// the img category.
    pub const fn category(&self) -> Option<AssetCategory> {
        match self {
            Self::Clean => None,
            Self::Html => Some(AssetCategory::Html),
            Self::Css => Some(AssetCategory::Css),
            Self::Js => Some(AssetCategory::Js),
            Self::Img | Self::Webp => Some(AssetCategory::Img),
            Self::Svg => Some(AssetCategory::Svg),
            Self::Video => Some(AssetCategory::Video),
            Self::Vendors => Some(AssetCategory::Vendors),
            Self::Fonts => Some(AssetCategory::Fonts),
        }
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Errors and reports
// ============================================================================

/// Task failure taxonomy.
///
/// The executor's recovery policy hangs on this split: transform failures
/// are recoverable in development, I/O failures never are.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Malformed input to a style/script/image/markup processor.
    #[error("{}: {message}", path.display())]
    Transform { path: PathBuf, message: String },

    /// Missing source, permission denied, disk full.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TaskError {
    pub fn transform(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Transform {
            path: path.into(),
            message: message.into(),
        }
    }

    pub const fn is_transform(&self) -> bool {
        matches!(self, Self::Transform { .. })
    }
}

/// What a completed task did.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskReport {
    /// Output files written.
    pub written: usize,
}

pub type TaskResult = Result<TaskReport, TaskError>;

// ============================================================================
// Context
// ============================================================================

/// Everything a task invocation needs. Built per pipeline run; the build
/// pipeline carries no event sender, so it cannot notify clients by
/// construction.
pub struct TaskContext<'a> {
    pub config: &'a PipelineConfig,
    pub resolver: &'a PathResolver,
    pub mode: BuildMode,
    events: Option<Sender<ChangeEvent>>,
}

impl<'a> TaskContext<'a> {
    pub fn new(config: &'a PipelineConfig, resolver: &'a PathResolver, mode: BuildMode) -> Self {
        Self {
            config,
            resolver,
            mode,
            events: None,
        }
    }

    /// Attach the live-reload publisher (dev pipeline only).
    pub fn with_events(mut self, events: Sender<ChangeEvent>) -> Self {
        debug_assert!(self.mode.is_dev());
        self.events = Some(events);
        self
    }

    /// Publish an output-changed event for a category.
    pub fn publish(&self, category: AssetCategory) {
        if let Some(events) = &self.events {
            let _ = events.send(ChangeEvent { category });
        }
    }
}

// ============================================================================
// Tasks and registry
// ============================================================================

/// A named build step.
pub struct Task {
    pub id: TaskId,
    run: fn(&TaskContext) -> TaskResult,
}

impl Task {
    /// Run the task; on success, publish the category's output-changed
    /// event (a no-op without a publisher).
    pub fn run(&self, ctx: &TaskContext) -> TaskResult {
        let report = (self.run)(ctx)?;
        if let Some(category) = self.id.category() {
            self.publish_if_visible(ctx, category, report);
        }
        Ok(report)
    }

    fn publish_if_visible(&self, ctx: &TaskContext, category: AssetCategory, report: TaskReport) {
        // A task that wrote nothing changed nothing worth reloading
        if report.written > 0 {
            ctx.publish(category);
        }
    }
}

/// The full task set, keyed by id.
pub struct Registry {
    tasks: FxHashMap<TaskId, Task>,
}

impl Registry {
    /// Build the standard registry covering every category.
    pub fn standard() -> Self {
        let entries: [(TaskId, fn(&TaskContext) -> TaskResult); 10] = [
            (TaskId::Clean, clean::run),
            (TaskId::Html, markup::run),
            (TaskId::Css, style::run),
            (TaskId::Js, script::run),
            (TaskId::Img, image::run_img),
            (TaskId::Webp, image::run_webp),
            (TaskId::Svg, sprite::run),
            (TaskId::Video, copy::run_video),
            (TaskId::Vendors, copy::run_vendors),
            (TaskId::Fonts, copy::run_fonts),
        ];

        let tasks = entries
            .into_iter()
            .map(|(id, run)| (id, Task { id, run }))
            .collect();
        Self { tasks }
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Write bytes, creating parent directories as needed.
pub(crate) fn write_output(dest: &Path, bytes: &[u8]) -> Result<(), TaskError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, bytes)?;
    Ok(())
}

/// Copy a file, creating parent directories as needed.
pub(crate) fn copy_output(source: &Path, dest: &Path) -> Result<(), TaskError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_tasks() {
        let registry = Registry::standard();
        assert!(registry.contains(TaskId::Clean));
        for id in TaskId::ASSET_TASKS {
            assert!(registry.contains(id), "missing task {id}");
        }
    }

    #[test]
    fn test_task_error_taxonomy() {
        let transform = TaskError::transform("/src/main.scss", "expected \"}\"");
        assert!(transform.is_transform());

        let io: TaskError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(!io.is_transform());
    }

    #[test]
    fn test_webp_reports_img_category() {
        assert_eq!(TaskId::Webp.category(), Some(AssetCategory::Img));
        assert_eq!(TaskId::Clean.category(), None);
    }
}
