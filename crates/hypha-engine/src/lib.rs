//! Tick engine and command surface for the Hypha growth simulation.
//!
//! [`World`] is the user-facing API: it owns the field store, the organism
//! collections, the ambient environment, and the command queue, and
//! advances them one discrete tick at a time. All mutating methods take
//! `&mut self`, so the borrow checker guarantees that no command can
//! interleave with an in-progress tick.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod ingress;
pub mod metrics;
pub mod organism;
pub mod report;
pub mod snapshot;
pub mod tick;
pub mod world;

pub use config::{ConfigError, GrowthTuning, WorldConfig};
pub use metrics::WorldMetrics;
pub use organism::{Branch, Organism};
pub use report::TickReport;
pub use snapshot::{BranchSnapshot, EngineSnapshot, OrganismSnapshot};
pub use world::World;
