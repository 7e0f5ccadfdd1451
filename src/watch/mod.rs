//! Watch loop: file-system changes → bound task re-invocation.
//!
//! One Watch Binding per category maps a change to exactly the task(s)
//! that rebuild it, bounding rebuild latency to the size of one category.
//! Bindings are validated against the registry at startup. A failing
//! binding reports and keeps the others watching.

mod debounce;

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use crossbeam::channel::Sender;
use notify::{RecursiveMode, Watcher};
use rustc_hash::FxHashSet;

use crate::config::PipelineConfig;
use crate::core::{AssetCategory, BuildMode, is_shutdown};
use crate::logger::{status_error, status_success};
use crate::reload::{ChangeEvent, Clients, ReloadMessage};
use crate::task::{Registry, TaskContext, TaskId};
use crate::utils::plural::plural_count;

use debounce::Debouncer;

/// Cap on channel waits so the loop notices shutdown promptly.
const MAX_POLL: Duration = Duration::from_millis(500);

/// Category matcher → tasks that rebuild it.
#[derive(Debug, Clone)]
pub struct WatchBinding {
    pub category: AssetCategory,
    pub tasks: Vec<TaskId>,
}

/// The standard binding set: one binding per category; an image change
/// also refreshes the WebP derivatives.
pub fn bindings() -> Vec<WatchBinding> {
    AssetCategory::ALL
        .iter()
        .map(|category| {
            let tasks = match category {
                AssetCategory::Html => vec![TaskId::Html],
                AssetCategory::Css => vec![TaskId::Css],
                AssetCategory::Js => vec![TaskId::Js],
                AssetCategory::Img => vec![TaskId::Img, TaskId::Webp],
                AssetCategory::Video => vec![TaskId::Video],
                AssetCategory::Svg => vec![TaskId::Svg],
                AssetCategory::Vendors => vec![TaskId::Vendors],
                AssetCategory::Fonts => vec![TaskId::Fonts],
            };
            WatchBinding {
                category: *category,
                tasks,
            }
        })
        .collect()
}

/// Every watched category must resolve to registered tasks.
pub fn validate_bindings(bindings: &[WatchBinding], registry: &Registry) -> Result<()> {
    let covered: FxHashSet<AssetCategory> = bindings.iter().map(|b| b.category).collect();
    for category in AssetCategory::ALL {
        if !covered.contains(&category) {
            bail!("no watch binding rebuilds category `{category}`");
        }
    }

    for binding in bindings {
        if binding.tasks.is_empty() {
            bail!("watch binding for `{}` has no tasks", binding.category);
        }
        for task in &binding.tasks {
            if !registry.contains(*task) {
                bail!(
                    "watch binding for `{}` names unregistered task `{task}`",
                    binding.category
                );
            }
        }
    }
    Ok(())
}

/// Spawn the watch loop thread.
///
/// Watches the source root recursively; debounced change batches are
/// classified to categories and dispatched to their bound tasks. Completed
/// tasks publish change events through `events` (picked up by the reload
/// hub); failures are reported on `clients` and the terminal.
pub fn spawn(
    config: PipelineConfig,
    events: Sender<ChangeEvent>,
    clients: Clients,
) -> Result<JoinHandle<()>> {
    let source_root = config.source_root();
    if !source_root.is_dir() {
        bail!("source directory {} does not exist", source_root.display());
    }

    let (notify_tx, notify_rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = notify_tx.send(res);
    })
    .context("failed to create file watcher")?;
    watcher
        .watch(&source_root, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {}", source_root.display()))?;

    crate::log!("watch"; "watching {}", source_root.display());

    let handle = std::thread::spawn(move || {
        // Keep the watcher alive for the thread's lifetime
        let _watcher = watcher;

        let registry = Registry::standard();
        let resolver = config.resolver();
        let bindings = bindings();
        let mut debouncer = Debouncer::new();

        loop {
            if is_shutdown() {
                break;
            }

            match notify_rx.recv_timeout(debouncer.sleep_duration().min(MAX_POLL)) {
                Ok(Ok(event)) => debouncer.add_event(&event),
                Ok(Err(e)) => crate::log!("watch"; "notify error: {}", e),
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if let Some(changes) = debouncer.take_if_ready() {
                        let ctx = TaskContext::new(&config, &resolver, BuildMode::DEVELOPMENT)
                            .with_events(events.clone());
                        let changed: Vec<_> = changes.into_keys().collect();
                        rebuild(&changed, &bindings, &registry, &resolver, &ctx, &clients);
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
    });

    Ok(handle)
}

/// Re-invoke exactly the tasks bound to the changed categories.
fn rebuild(
    changed: &[std::path::PathBuf],
    bindings: &[WatchBinding],
    registry: &Registry,
    resolver: &crate::resolve::PathResolver,
    ctx: &TaskContext,
    clients: &Clients,
) {
    let categories: FxHashSet<AssetCategory> = changed
        .iter()
        .filter_map(|path| resolver.classify(path))
        .collect();

    if categories.is_empty() {
        return;
    }

    for binding in bindings {
        if !categories.contains(&binding.category) {
            continue;
        }
        // One failing binding must not stop the others
        run_binding(binding, registry, ctx, clients);
    }
}

fn run_binding(
    binding: &WatchBinding,
    registry: &Registry,
    ctx: &TaskContext,
    clients: &Clients,
) {
    for id in &binding.tasks {
        let Some(task) = registry.get(*id) else {
            // validate_bindings() runs before the loop starts
            continue;
        };

        match task.run(ctx) {
            Ok(report) => {
                status_success(&format!(
                    "rebuilt {} ({})",
                    id,
                    plural_count(report.written, "file")
                ));
            }
            Err(err) => {
                status_error(&format!("{id} rebuild failed"), &err.to_string());
                clients.broadcast(&ReloadMessage::error(err.to_string()));
            }
        }
    }
}
