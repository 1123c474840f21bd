//! Core types and registries for the Hypha growth simulation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary used throughout the Hypha workspace: type IDs, species
//! and substrate registries, chemical layer definitions, the environment
//! model, command/receipt types, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod chemical;
pub mod command;
pub mod environment;
pub mod error;
pub mod event;
pub mod id;
pub mod species;
pub mod substrate;

pub use chemical::{canonical_chemicals, ChemicalDef, ChemicalInit, GLUCOSE, OXYGEN};
pub use command::{Command, CommandPayload, Receipt};
pub use environment::{growth_factor, Environment, EnvironmentUpdate};
pub use error::{CommandError, RegistryError};
pub use event::GrowthEvent;
pub use id::{ChemicalId, OrganismId, TickId};
pub use species::{SpeciesProfile, SpeciesRegistry, SubstratePreference, Tolerance};
pub use substrate::{SubstrateRegistry, SubstrateType};
