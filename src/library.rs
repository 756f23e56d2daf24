//! The media index: scanning local music files into `Audio` records.

mod model;
mod polish;
mod scan;

pub use model::Audio;
pub use scan::{path_id, scan};
