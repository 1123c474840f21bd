//! World configuration, validation, and error types.
//!
//! [`WorldConfig`] is the input for constructing a [`World`](crate::World).
//! Validation runs once at construction, so a built world can rely on its
//! registries, dish geometry, and tuning values being well-formed.

use std::error::Error;
use std::fmt;

use hypha_core::chemical::{canonical_chemicals, ChemicalDef};
use hypha_core::error::RegistryError;
use hypha_core::species::SpeciesRegistry;
use hypha_core::substrate::SubstrateRegistry;
use hypha_field::FieldError;

// ── GrowthTuning ───────────────────────────────────────────────────

/// The growth-rule constants, exposed so tests can pin them and hosts
/// can tune them.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthTuning {
    /// Branch tips sprouted at placement. Default: 8.
    pub initial_tips: u32,
    /// Nutrient (and glucose) subtracted per advancing tip. Default: 0.5.
    pub depletion: f32,
    /// Edge-contact ticks after which a colony tip becomes a fruiting
    /// candidate. Default: 50.
    pub boundary_threshold: u32,
    /// Growth multiplier on a preferred-substrate match. Default: 1.2.
    pub affinity_bonus: f32,
    /// Angular jitter half-width (radians) applied to each sprouted tip.
    /// Default: 0.2.
    pub placement_jitter: f32,
    /// Angular jitter half-width (radians) applied on each advance.
    /// Default: 0.15.
    pub advance_jitter: f32,
    /// Angular jitter half-width (radians) for spawned siblings, wider
    /// than the advance jitter. Default: 0.8.
    pub branch_jitter: f32,
    /// Nutrient level at which the branching probability is taken at
    /// face value. Default: 100.
    pub branch_nutrient_scale: f32,
}

impl Default for GrowthTuning {
    fn default() -> Self {
        Self {
            initial_tips: 8,
            depletion: 0.5,
            boundary_threshold: 50,
            affinity_bonus: 1.2,
            placement_jitter: 0.2,
            advance_jitter: 0.15,
            branch_jitter: 0.8,
            branch_nutrient_scale: 100.0,
        }
    }
}

impl GrowthTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidTuning {
            reason: reason.into(),
        };
        if self.initial_tips == 0 {
            return Err(invalid("initial_tips must be at least 1"));
        }
        if !self.depletion.is_finite() || self.depletion < 0.0 {
            return Err(invalid("depletion must be finite and >= 0"));
        }
        if !self.affinity_bonus.is_finite() || self.affinity_bonus < 1.0 {
            return Err(invalid("affinity_bonus must be finite and >= 1"));
        }
        for (name, value) in [
            ("placement_jitter", self.placement_jitter),
            ("advance_jitter", self.advance_jitter),
            ("branch_jitter", self.branch_jitter),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTuning {
                    reason: format!("{name} must be finite and >= 0"),
                });
            }
        }
        if !self.branch_nutrient_scale.is_finite() || self.branch_nutrient_scale <= 0.0 {
            return Err(invalid("branch_nutrient_scale must be finite and > 0"));
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`WorldConfig`] validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Dish geometry or chemical registration is invalid.
    Field(FieldError),
    /// A species or substrate registry failed validation.
    Registry(RegistryError),
    /// The configured initial substrate is not in the registry.
    UnknownInitialSubstrate {
        /// The unresolved name.
        name: String,
    },
    /// The command queue capacity is zero.
    QueueCapacityZero,
    /// A growth tuning constant is out of range.
    InvalidTuning {
        /// Description of the violated constraint.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(e) => write!(f, "field: {e}"),
            Self::Registry(e) => write!(f, "registry: {e}"),
            Self::UnknownInitialSubstrate { name } => {
                write!(f, "initial substrate '{name}' is not registered")
            }
            Self::QueueCapacityZero => write!(f, "max_command_queue must be at least 1"),
            Self::InvalidTuning { reason } => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            Self::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for ConfigError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

impl From<RegistryError> for ConfigError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

// ── WorldConfig ────────────────────────────────────────────────────

/// Input for constructing a world.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Cells per side of the dish bounding box.
    pub dish_size: u32,
    /// Disk radius; must fit inside the half-box.
    pub dish_radius: f32,
    /// The colony and contaminant species tables.
    pub species: SpeciesRegistry,
    /// The substrate table.
    pub substrates: SubstrateRegistry,
    /// Chemical layers, registered in order.
    pub chemicals: Vec<ChemicalDef>,
    /// Name of the substrate active at construction.
    pub initial_substrate: String,
    /// Seed for the world RNG; `reset()` reseeds from this value.
    pub seed: u64,
    /// Command queue capacity.
    pub max_command_queue: usize,
    /// Retained event log length; older events are discarded first.
    pub max_event_log: usize,
    /// The growth-rule constants.
    pub tuning: GrowthTuning,
}

impl WorldConfig {
    /// A runnable configuration with the default registries, canonical
    /// chemicals, and agar substrate on a 200-cell dish.
    pub fn standard(seed: u64) -> Self {
        Self {
            dish_size: 200,
            dish_radius: 95.0,
            species: SpeciesRegistry::defaults(),
            substrates: SubstrateRegistry::defaults(),
            chemicals: canonical_chemicals(),
            initial_substrate: "agar".into(),
            seed,
            max_command_queue: 256,
            max_event_log: 1024,
            tuning: GrowthTuning::default(),
        }
    }

    /// Check structural invariants that the dish and field store cannot
    /// catch on their own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_command_queue == 0 {
            return Err(ConfigError::QueueCapacityZero);
        }
        if self.substrates.get(&self.initial_substrate).is_none() {
            return Err(ConfigError::UnknownInitialSubstrate {
                name: self.initial_substrate.clone(),
            });
        }
        self.tuning.validate()
    }
}
