//! Data models for the IdeaNest application.
//!
//! These models match the frontend TypeScript interfaces for seamless interoperability.

mod category;
mod draft;
mod idea;
mod snapshot;

pub use category::*;
pub use draft::*;
pub use idea::*;
pub use snapshot::*;
