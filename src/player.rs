//! Playback: the rodio engine, the service handler shim and the observable
//! state stream.

mod engine;
mod handler;
mod service;
mod sink;
mod ticker;
mod types;

pub use service::Player;
pub use types::{AudioState, PlayerEvent};
