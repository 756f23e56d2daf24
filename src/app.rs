//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the current library,
//! selection and the playback snapshot folded from the state stream.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
