//! Live reload: pub/sub change events and the WebSocket delivery channel.
//!
//! Tasks publish [`ChangeEvent`]s tagged by category; the hub decides
//! reload granularity and broadcasts [`ReloadMessage`]s to connected
//! browser clients. The build pipeline has no publisher, so it can never
//! reach this module.

mod hub;
mod message;
mod server;

pub use hub::{ChangeEvent, Clients, spawn_hub};
pub use message::ReloadMessage;
pub use server::start_ws_server;
