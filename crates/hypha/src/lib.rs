//! Hypha: a deterministic mycelium growth simulation engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Hypha sub-crates. For most users, adding `hypha` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use hypha::prelude::*;
//!
//! // A runnable world: default species tables, agar, 200-cell dish.
//! let mut world = World::new(WorldConfig::standard(42)).unwrap();
//!
//! // Inoculate the center and let a contaminant compete from the side.
//! world.place_organism(100.0, 100.0, "oyster", false).unwrap();
//! world.place_organism(140.0, 100.0, "trichoderma", true).unwrap();
//!
//! for _ in 0..25 {
//!     let report = world.step();
//!     assert!(report.advanced);
//! }
//!
//! let snapshot = world.snapshot();
//! assert_eq!(snapshot.tick, hypha::types::TickId(25));
//! assert!(!snapshot.organisms.is_empty());
//! // Overlay scaling data for a renderer:
//! let nutrient = snapshot.field_summary.nutrient;
//! assert!(nutrient.min >= 0.0 && nutrient.max <= 100.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `hypha-core` | IDs, species/substrate registries, environment, commands, events |
//! | [`field`] | `hypha-field` | Dish geometry and dense field storage |
//! | [`engine`] | `hypha-engine` | The world, tick engine, config, reports, snapshots |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, registries, and the environment model (`hypha-core`).
///
/// Contains the typed IDs, [`types::SpeciesRegistry`],
/// [`types::SubstrateRegistry`], the pure [`types::growth_factor`]
/// function, command/receipt vocabulary, and error types.
pub use hypha_core as types;

/// Dish geometry and dense field storage (`hypha-field`).
///
/// Provides [`field::Dish`], [`field::FieldStore`], and the
/// [`field::FieldSummary`] projection used in snapshots.
pub use hypha_field as field;

/// The simulation engine (`hypha-engine`).
///
/// [`engine::World`] is the main entry point: place organisms, step the
/// clock, change environment and substrate, read snapshots.
pub use hypha_engine as engine;

/// Common imports for typical Hypha usage.
///
/// ```rust
/// use hypha::prelude::*;
/// ```
pub mod prelude {
    // Engine surface
    pub use hypha_engine::{
        BranchSnapshot, ConfigError, EngineSnapshot, GrowthTuning, OrganismSnapshot, TickReport,
        World, WorldConfig, WorldMetrics,
    };

    // Core vocabulary
    pub use hypha_core::{
        CommandPayload, Environment, EnvironmentUpdate, GrowthEvent, OrganismId, Receipt,
        SpeciesProfile, SpeciesRegistry, SubstratePreference, SubstrateRegistry, SubstrateType,
        TickId,
    };

    // Errors
    pub use hypha_core::{CommandError, RegistryError};

    // Field surface
    pub use hypha_field::{Dish, FieldStore, FieldSummary, MinMax};
}
