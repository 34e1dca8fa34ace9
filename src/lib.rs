//! Glaucoma field-loss simulation for live video.
//!
//! Each frame goes through four stages: an elliptical field-of-view mask
//! ([`mask`]), a Gaussian-softened edge ([`smooth`]), a fixed rescale to
//! weights ([`normalize`]) and a saturating multiply against the frame
//! ([`blend`]). [`filter::apply_filter`] runs all four; [`preset`] holds the
//! named disease stages.

pub mod blend;
pub mod error;
pub mod filter;
pub mod mask;
pub mod normalize;
pub mod preset;
pub mod smooth;
pub mod types;

pub use error::Error;
pub use filter::{FilterParams, apply_filter};
pub use preset::Severity;
pub use types::Frame;
