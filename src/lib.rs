//! Travel Guide Explore
//!
//! Nearby landmark discovery for the travel guide explore page: locate the
//! user, query map data for points of interest, enrich them, and keep a list
//! panel and map markers in sync with the result and the user's saved places.

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod gateway;
pub mod geo;
pub mod models;
pub mod presentation;
pub mod saved;
pub mod session;

pub use config::Config;
pub use errors::{AppError, LocationError};
pub use session::{ExploreSession, FetchOutcome, FetchTicket};
