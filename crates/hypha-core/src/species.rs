//! Species profiles and the colony/contaminant registries.
//!
//! A [`SpeciesProfile`] is immutable growth data for one species. Profiles
//! live in a [`SpeciesRegistry`] holding two disjoint tables: colony
//! species (desired growth) and contaminant species (competing growth).
//! Both tables are validated at construction, so an organism placed
//! through the registry can never reference an unknown species at tick
//! time; the engine clones the resolved profile into the organism.

use crate::error::RegistryError;
use indexmap::IndexMap;

/// An optimal value with a symmetric tolerance band.
///
/// Suitability falls off linearly from 1 at `optimal` to 0 at
/// `optimal ± tolerance`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    /// The value at which suitability is 1.
    pub optimal: f32,
    /// Half-width of the band outside which suitability is 0.
    pub tolerance: f32,
}

impl Tolerance {
    /// Convenience constructor.
    pub fn new(optimal: f32, tolerance: f32) -> Self {
        Self { optimal, tolerance }
    }
}

/// Substrate preference declared by a species profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubstratePreference {
    /// The species accepts any substrate; the affinity bonus always applies.
    Any,
    /// The species prefers one named substrate.
    Named(String),
}

impl SubstratePreference {
    /// Whether the active substrate earns this species the affinity bonus.
    pub fn matches(&self, active: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Named(name) => name == active,
        }
    }
}

/// Immutable growth parameters for one species.
///
/// `filament_thickness` is cosmetic: it flows through to snapshots for
/// renderers but never influences engine logic. `merge_probability` is
/// reserved for organism merging and is not read by the base rules.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesProfile {
    /// Species identifier, unique within its table.
    pub name: String,
    /// Base growth rate multiplier (distance units per tick at factor 1).
    pub growth_rate: f32,
    /// Rendered filament thickness. Output attribute only.
    pub filament_thickness: f32,
    /// Probability per advancing step that a tip spawns a sibling,
    /// before nutrient scaling.
    pub branching_probability: f32,
    /// Substrate this species grows best on.
    pub preferred_substrate: SubstratePreference,
    /// Reserved for future organism merging.
    pub merge_probability: f32,
    /// Strength of this species' antifungal secretion. Reserved.
    pub antifungal_potency: f32,
    /// Optimal pH. `None` uses the documented default (6.5).
    pub optimal_ph: Option<f32>,
    /// Optimal temperature band (°F). `None` uses 70 ± 20.
    pub optimal_temperature: Option<Tolerance>,
    /// Optimal relative humidity band (%). `None` uses 80 ± 20.
    pub optimal_humidity: Option<Tolerance>,
}

impl SpeciesProfile {
    fn validate(&self) -> Result<(), RegistryError> {
        let checks: [(&str, f32); 4] = [
            ("growth_rate", self.growth_rate),
            ("filament_thickness", self.filament_thickness),
            ("branching_probability", self.branching_probability),
            ("merge_probability", self.merge_probability),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(RegistryError::InvalidProfile {
                    name: self.name.clone(),
                    reason: format!("{field} must be finite and >= 0, got {value}"),
                });
            }
        }
        for (field, band) in [
            ("optimal_temperature", self.optimal_temperature),
            ("optimal_humidity", self.optimal_humidity),
        ] {
            if let Some(band) = band {
                if !band.tolerance.is_finite() || band.tolerance <= 0.0 {
                    return Err(RegistryError::InvalidProfile {
                        name: self.name.clone(),
                        reason: format!("{field} tolerance must be positive, got {}", band.tolerance),
                    });
                }
            }
        }
        Ok(())
    }
}

/// The two disjoint species tables, keyed by species name.
///
/// Lookup is keyed by `(name, contaminant flag)`: colony organisms resolve
/// against the colony table, contaminants against the contaminant table.
/// Iteration order is registration order, which keeps snapshots and
/// default-table behavior deterministic.
#[derive(Clone, Debug)]
pub struct SpeciesRegistry {
    colonies: IndexMap<String, SpeciesProfile>,
    contaminants: IndexMap<String, SpeciesProfile>,
}

impl SpeciesRegistry {
    /// Build a registry from explicit tables, validating every profile.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either table is empty, a name appears twice within
    /// a table, or a profile carries a non-finite/negative parameter.
    pub fn new(
        colonies: Vec<SpeciesProfile>,
        contaminants: Vec<SpeciesProfile>,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            colonies: Self::build_table(colonies, false)?,
            contaminants: Self::build_table(contaminants, true)?,
        })
    }

    fn build_table(
        profiles: Vec<SpeciesProfile>,
        contaminant: bool,
    ) -> Result<IndexMap<String, SpeciesProfile>, RegistryError> {
        if profiles.is_empty() {
            return Err(RegistryError::EmptyTable { contaminant });
        }
        let mut table = IndexMap::with_capacity(profiles.len());
        for profile in profiles {
            profile.validate()?;
            let name = profile.name.clone();
            if table.insert(name.clone(), profile).is_some() {
                return Err(RegistryError::DuplicateSpecies { name, contaminant });
            }
        }
        Ok(table)
    }

    /// The compiled-in default tables: four cultivated species and four
    /// common contaminants.
    pub fn defaults() -> Self {
        let hardwood = || SubstratePreference::Named("hardwood-sawdust".into());
        let colonies = vec![
            SpeciesProfile {
                name: "oyster".into(),
                growth_rate: 1.2,
                filament_thickness: 2.0,
                branching_probability: 0.15,
                preferred_substrate: SubstratePreference::Any,
                merge_probability: 0.05,
                antifungal_potency: 0.3,
                optimal_ph: Some(6.0),
                optimal_temperature: Some(Tolerance::new(70.0, 20.0)),
                optimal_humidity: Some(Tolerance::new(85.0, 15.0)),
            },
            SpeciesProfile {
                name: "shiitake".into(),
                growth_rate: 0.9,
                filament_thickness: 1.5,
                branching_probability: 0.12,
                preferred_substrate: hardwood(),
                merge_probability: 0.05,
                antifungal_potency: 0.2,
                optimal_ph: Some(5.5),
                optimal_temperature: Some(Tolerance::new(65.0, 15.0)),
                optimal_humidity: Some(Tolerance::new(80.0, 20.0)),
            },
            SpeciesProfile {
                name: "reishi".into(),
                growth_rate: 0.7,
                filament_thickness: 2.5,
                branching_probability: 0.10,
                preferred_substrate: hardwood(),
                merge_probability: 0.05,
                antifungal_potency: 0.5,
                optimal_ph: Some(6.0),
                optimal_temperature: Some(Tolerance::new(75.0, 15.0)),
                optimal_humidity: Some(Tolerance::new(85.0, 15.0)),
            },
            SpeciesProfile {
                name: "lions-mane".into(),
                growth_rate: 0.8,
                filament_thickness: 1.8,
                branching_probability: 0.18,
                preferred_substrate: hardwood(),
                merge_probability: 0.05,
                antifungal_potency: 0.1,
                optimal_ph: None,
                optimal_temperature: Some(Tolerance::new(70.0, 15.0)),
                optimal_humidity: Some(Tolerance::new(85.0, 15.0)),
            },
        ];
        let contaminants = vec![
            SpeciesProfile {
                name: "trichoderma".into(),
                growth_rate: 1.6,
                filament_thickness: 1.0,
                branching_probability: 0.25,
                preferred_substrate: SubstratePreference::Any,
                merge_probability: 0.0,
                antifungal_potency: 0.8,
                optimal_ph: Some(5.0),
                optimal_temperature: Some(Tolerance::new(78.0, 22.0)),
                optimal_humidity: Some(Tolerance::new(90.0, 20.0)),
            },
            SpeciesProfile {
                name: "penicillium".into(),
                growth_rate: 1.1,
                filament_thickness: 0.8,
                branching_probability: 0.20,
                preferred_substrate: SubstratePreference::Any,
                merge_probability: 0.0,
                antifungal_potency: 0.6,
                optimal_ph: Some(5.5),
                optimal_temperature: Some(Tolerance::new(72.0, 20.0)),
                optimal_humidity: Some(Tolerance::new(85.0, 25.0)),
            },
            SpeciesProfile {
                name: "aspergillus".into(),
                growth_rate: 1.3,
                filament_thickness: 0.9,
                branching_probability: 0.22,
                preferred_substrate: SubstratePreference::Any,
                merge_probability: 0.0,
                antifungal_potency: 0.5,
                optimal_ph: None,
                optimal_temperature: Some(Tolerance::new(85.0, 20.0)),
                optimal_humidity: Some(Tolerance::new(80.0, 25.0)),
            },
            SpeciesProfile {
                name: "rhizopus".into(),
                growth_rate: 1.8,
                filament_thickness: 1.2,
                branching_probability: 0.30,
                preferred_substrate: SubstratePreference::Named("grain".into()),
                merge_probability: 0.0,
                antifungal_potency: 0.4,
                optimal_ph: Some(6.0),
                optimal_temperature: Some(Tolerance::new(80.0, 20.0)),
                optimal_humidity: Some(Tolerance::new(90.0, 15.0)),
            },
        ];
        Self::new(colonies, contaminants).expect("default species tables are valid")
    }

    /// Look up a profile by name in the table selected by `contaminant`.
    pub fn get(&self, name: &str, contaminant: bool) -> Option<&SpeciesProfile> {
        if contaminant {
            self.contaminants.get(name)
        } else {
            self.colonies.get(name)
        }
    }

    /// Iterate colony profiles in registration order.
    pub fn colonies(&self) -> impl Iterator<Item = &SpeciesProfile> {
        self.colonies.values()
    }

    /// Iterate contaminant profiles in registration order.
    pub fn contaminants(&self) -> impl Iterator<Item = &SpeciesProfile> {
        self.contaminants.values()
    }
}
