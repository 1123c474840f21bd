//! Read-only projections of engine state for external consumers.
//!
//! A snapshot is an owned value: building one never mutates the engine,
//! and two snapshots taken with no intervening mutation compare equal.

use hypha_core::environment::Environment;
use hypha_core::id::{OrganismId, TickId};
use hypha_field::FieldSummary;

/// One branch tip, as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchSnapshot {
    /// x position in the dish bounding box.
    pub x: f32,
    /// y position in the dish bounding box.
    pub y: f32,
    /// Growth direction in radians.
    pub angle: f32,
    /// Ticks survived.
    pub age: u32,
    /// Consecutive ticks of edge contact.
    pub boundary_ticks: u32,
}

/// One organism, as seen by a renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct OrganismSnapshot {
    /// Unique identifier.
    pub id: OrganismId,
    /// Species name.
    pub species: String,
    /// Whether the organism is a contaminant.
    pub contaminant: bool,
    /// Rendered filament thickness from the species profile.
    pub filament_thickness: f32,
    /// Total nutrient consumed so far.
    pub nutrients_absorbed: f32,
    /// Live branch tips.
    pub branches: Vec<BranchSnapshot>,
}

/// Queryable state of a world at one tick boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineSnapshot {
    /// Ticks elapsed since construction or the last reset.
    pub tick: TickId,
    /// Whether the clock is paused.
    pub paused: bool,
    /// Copy of the ambient environment parameters.
    pub environment: Environment,
    /// Live organisms: colonies first, then contaminants, each in
    /// insertion order.
    pub organisms: Vec<OrganismSnapshot>,
    /// Per-layer ranges over in-bounds cells plus the active substrate's
    /// nutrient level.
    pub field_summary: FieldSummary,
}
