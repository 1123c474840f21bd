//! Dish geometry and dense field storage for the Hypha growth simulation.
//!
//! A [`Dish`] is the bounded coordinate space: a disk of fixed radius
//! centered in a square bounding box of cells. A [`FieldStore`] holds one
//! dense `f32` layer per field (nutrient, antifungal, and the named
//! chemical layers) over that box, with clamped depletion and a
//! min/max summary over in-bounds cells.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dish;
pub mod error;
pub mod store;

pub use dish::Dish;
pub use error::FieldError;
pub use store::{FieldStore, FieldSummary, MinMax};
