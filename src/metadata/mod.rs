//! Metadata aggregation: turning a TMDB link into a [`NormalizedRecord`].
//!
//! # Module layout
//!
//! - [`link`] -- Parsing media links into a [`MediaReference`].
//! - [`tmdb`] -- Per-request TMDB session and wire types.
//! - [`record`] -- The merged record handed to the renderer.
//! - [`aggregator`] -- Concurrent fan-out/fan-in and season overrides.

pub mod aggregator;
pub mod link;
pub mod record;
pub mod tmdb;

pub use aggregator::Aggregator;
pub use link::{MediaReference, MediaType};
pub use record::{EpisodeName, NormalizedRecord};
