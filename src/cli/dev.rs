//! The `dev` command: clean, build, serve, watch.

use anyhow::Result;
use crossbeam::channel;

use crate::config::PipelineConfig;
use crate::graph::{Pipeline, run_pipeline};
use crate::reload::{Clients, spawn_hub, start_ws_server};
use crate::task::{Registry, TaskContext};
use crate::{serve, watch};

pub fn run(config: &PipelineConfig) -> Result<()> {
    let resolver = config.resolver();
    let registry = Registry::standard();
    let pipeline = Pipeline::dev();

    // Startup validation: graph shape and watch bindings
    pipeline.graph.validate(&registry)?;
    let bindings = watch::bindings();
    watch::validate_bindings(&bindings, &registry)?;

    // Reload plumbing. The publisher side goes into every dev task
    // context; the hub owns granularity and delivery.
    let (events_tx, events_rx) = channel::unbounded();
    let (ws_port, clients) = if config.serve.watch {
        let (port, clients) = start_ws_server(config.serve.ws_port)?;
        (Some(port), clients)
    } else {
        (None, Clients::new())
    };
    let _hub = spawn_hub(events_rx, clients.clone());

    let ctx = TaskContext::new(config, &resolver, pipeline.mode).with_events(events_tx.clone());
    run_pipeline(&pipeline, &registry, &ctx)?;
    drop(ctx);

    let server = serve::bind_server(config)?;

    let _watcher = if config.serve.watch {
        Some(watch::spawn(config.clone(), events_tx, clients)?)
    } else {
        drop(events_tx);
        None
    };

    server.run(config.output_root(), ws_port)
}
