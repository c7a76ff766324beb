//! Data models for the explore pipeline.
//!
//! Field names follow the JSON spelling of the providers and the travel guide server.

mod coordinate;
mod landmark;
mod osm;
mod saved;

pub use coordinate::*;
pub use landmark::*;
pub use osm::*;
pub use saved::*;
