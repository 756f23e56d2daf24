//! The local metadata cache: one SQLite table of audio records plus the
//! cache-first repository that decides between cache and index.

mod cache;
mod entity;
mod repository;

pub use cache::{AudioCache, resolve_cache_path};
pub use entity::AudioRow;
pub use repository::load_library;
