//! The tick engine: one discrete step of growth across every organism.
//!
//! [`TickEngine`] owns the field store, the two organism collections
//! (colonies, then contaminants, insertion order within each), the
//! ambient [`Environment`], and the seeded world RNG. A tick always runs
//! to completion; there is no partial-tick state.
//!
//! # Branch survival
//!
//! Each organism's branch list is rebuilt every tick: the engine iterates
//! a snapshot of the current tips, pushes survivors into a fresh buffer,
//! and swaps at the end. Into the next list go tips that advanced, tips
//! spawned by branching, stalled tips (growth rate <= 0 this tick), and
//! tips held at the dish edge. Starved tips, those whose target cell has
//! no nutrient left, are dropped; that is the only mechanism by which an
//! organism shrinks and eventually dies.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hypha_core::environment::{growth_factor, Environment, EnvironmentUpdate};
use hypha_core::error::CommandError;
use hypha_core::event::GrowthEvent;
use hypha_core::id::{OrganismId, TickId};
use hypha_core::species::SpeciesRegistry;
use hypha_core::substrate::SubstrateRegistry;
use hypha_field::{Dish, FieldStore};

use crate::config::{ConfigError, GrowthTuning, WorldConfig};
use crate::organism::{jitter, Branch, BranchList, Organism};
use crate::report::TickReport;
use crate::snapshot::{BranchSnapshot, EngineSnapshot, OrganismSnapshot};

/// The simulation clock and everything it advances.
pub struct TickEngine {
    store: FieldStore,
    species: SpeciesRegistry,
    substrates: SubstrateRegistry,
    env: Environment,
    colonies: Vec<Organism>,
    contaminants: Vec<Organism>,
    tick: TickId,
    next_organism_id: u64,
    rng: ChaCha8Rng,
    tuning: GrowthTuning,
    seed: u64,
}

impl TickEngine {
    /// Build an engine from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation or
    /// the dish/field store cannot be constructed from it.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let dish = Dish::new(config.dish_size, config.dish_radius)?;
        let nutrient = config
            .substrates
            .get(&config.initial_substrate)
            .map(|s| s.nutrient)
            .ok_or_else(|| ConfigError::UnknownInitialSubstrate {
                name: config.initial_substrate.clone(),
            })?;
        let store = FieldStore::new(dish, &config.chemicals, nutrient)?;
        Ok(Self {
            store,
            species: config.species,
            substrates: config.substrates,
            env: Environment::new(config.initial_substrate),
            colonies: Vec::new(),
            contaminants: Vec::new(),
            tick: TickId(0),
            next_organism_id: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tuning: config.tuning,
            seed: config.seed,
        })
    }

    /// Ticks elapsed since construction or the last reset.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// The ambient environment parameters.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// The field store (read access for hosts and tests).
    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    /// The configured seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Live organisms: colonies first, then contaminants.
    pub fn organisms(&self) -> impl Iterator<Item = &Organism> {
        self.colonies.iter().chain(&self.contaminants)
    }

    /// Place an organism at `(x, y)`.
    ///
    /// An out-of-bounds position is a silent no-op returning `Ok(None)`,
    /// matching the edge-avoidance semantics of growth itself. A species
    /// name missing from the selected table is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownSpecies`] for an unresolvable name.
    pub fn place_organism(
        &mut self,
        x: f32,
        y: f32,
        species: &str,
        contaminant: bool,
    ) -> Result<Option<OrganismId>, CommandError> {
        if !self.store.dish().contains(x, y) {
            return Ok(None);
        }
        let profile = self
            .species
            .get(species, contaminant)
            .cloned()
            .ok_or_else(|| CommandError::UnknownSpecies {
                name: species.into(),
                contaminant,
            })?;
        let id = OrganismId(self.next_organism_id);
        self.next_organism_id += 1;
        let organism = Organism::sprout(
            id,
            profile,
            contaminant,
            x,
            y,
            self.tuning.initial_tips,
            self.tuning.placement_jitter,
            &mut self.rng,
        );
        if contaminant {
            self.contaminants.push(organism);
        } else {
            self.colonies.push(organism);
        }
        Ok(Some(id))
    }

    /// Apply a partial environment update.
    pub fn set_environment(&mut self, update: &EnvironmentUpdate) {
        self.env.apply(update);
    }

    /// Switch the active substrate: reinitialize every field layer from
    /// the new medium and clear all organisms. The tick counter survives.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownSubstrate`] for an unregistered
    /// name; the world is left untouched.
    pub fn set_substrate(&mut self, name: &str) -> Result<(), CommandError> {
        let nutrient = self
            .substrates
            .get(name)
            .map(|s| s.nutrient)
            .ok_or_else(|| CommandError::UnknownSubstrate { name: name.into() })?;
        self.env.set_substrate(name);
        self.store.reinitialize(nutrient);
        self.colonies.clear();
        self.contaminants.clear();
        Ok(())
    }

    /// Set a chemical layer at the cell under `(x, y)`, clamped to >= 0.
    /// Out-of-bounds positions are silently ignored, like placement.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownChemical`] for an unregistered
    /// layer name, whether or not the position was in bounds.
    pub fn set_chemical(
        &mut self,
        chemical: &str,
        x: f32,
        y: f32,
        value: f32,
    ) -> Result<(), CommandError> {
        let id = self
            .store
            .chemical_id(chemical)
            .ok_or_else(|| CommandError::UnknownChemical {
                name: chemical.into(),
            })?;
        if let Some(cell) = self.store.dish().cell_in_disk(x, y) {
            self.store.set_chemical_at(id, cell, value);
        }
        Ok(())
    }

    /// Reinitialize fields from the active substrate, clear all
    /// organisms, zero the tick counter, and reseed the RNG so the next
    /// run replays identically.
    pub fn reset(&mut self) {
        let nutrient = self.store.substrate_nutrient();
        self.store.reinitialize(nutrient);
        self.colonies.clear();
        self.contaminants.clear();
        self.tick = TickId(0);
        self.next_organism_id = 0;
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    /// Advance exactly one discrete time unit.
    ///
    /// Colonies are processed before contaminants, each collection in
    /// insertion order. Within one tick the last writer wins on any
    /// shared cell's nutrient, an accepted property of the sequential
    /// scan, since organisms only interact through the fields.
    pub fn step(&mut self) -> TickReport {
        self.tick = TickId(self.tick.0 + 1);
        let mut report = TickReport {
            tick: self.tick,
            advanced: true,
            ..Default::default()
        };

        for contaminant_pass in [false, true] {
            let mut organisms = if contaminant_pass {
                std::mem::take(&mut self.contaminants)
            } else {
                std::mem::take(&mut self.colonies)
            };
            for organism in &mut organisms {
                self.grow_organism(organism, &mut report);
            }
            organisms.retain(|organism| {
                if organism.branches.is_empty() {
                    report.removed.push(organism.id);
                    false
                } else {
                    report
                        .branch_counts
                        .push((organism.id, organism.branches.len() as u32));
                    true
                }
            });
            if contaminant_pass {
                self.contaminants = organisms;
            } else {
                self.colonies = organisms;
            }
        }

        report
    }

    /// Read-only projection of the current state.
    pub fn snapshot(&self, paused: bool) -> EngineSnapshot {
        let organisms = self
            .organisms()
            .map(|organism| OrganismSnapshot {
                id: organism.id,
                species: organism.profile.name.clone(),
                contaminant: organism.contaminant,
                filament_thickness: organism.profile.filament_thickness,
                nutrients_absorbed: organism.nutrients_absorbed,
                branches: organism
                    .branches
                    .iter()
                    .map(|branch| BranchSnapshot {
                        x: branch.x,
                        y: branch.y,
                        angle: branch.angle,
                        age: branch.age,
                        boundary_ticks: branch.boundary_ticks,
                    })
                    .collect(),
            })
            .collect();
        EngineSnapshot {
            tick: self.tick,
            paused,
            environment: self.env.clone(),
            organisms,
            field_summary: self.store.summary(),
        }
    }

    /// Advance every branch of one organism, rebuilding its branch list.
    fn grow_organism(&mut self, organism: &mut Organism, report: &mut TickReport) {
        let affinity = if organism
            .profile
            .preferred_substrate
            .matches(self.env.substrate())
        {
            self.tuning.affinity_bonus
        } else {
            1.0
        };
        let growth = organism.profile.growth_rate * growth_factor(&organism.profile, &self.env) * affinity;

        let current = std::mem::take(&mut organism.branches);
        let mut next = BranchList::new();
        for mut branch in current {
            branch.age += 1;

            // A bad tick stalls the tip; it neither advances nor dies.
            if growth <= 0.0 {
                next.push(branch);
                continue;
            }

            let nx = branch.x + growth * branch.angle.cos();
            let ny = branch.y + growth * branch.angle.sin();
            match self.store.dish().cell_in_disk(nx, ny) {
                None => {
                    // Held at the dish edge; the tip survives in place.
                    branch.boundary_ticks += 1;
                    if branch.boundary_ticks == self.tuning.boundary_threshold + 1
                        && !organism.contaminant
                    {
                        report.events.push(GrowthEvent::FruitingCandidate {
                            organism: organism.id,
                            x: branch.x,
                            y: branch.y,
                            tick: self.tick,
                        });
                    }
                    next.push(branch);
                }
                Some(cell) => {
                    if self.store.nutrient_at(cell) <= 0.0 {
                        // Starved: the tip is dropped, not stalled.
                        report.events.push(GrowthEvent::TipStarved {
                            organism: organism.id,
                            x: branch.x,
                            y: branch.y,
                            tick: self.tick,
                        });
                        continue;
                    }
                    let consumed = self.store.deplete(cell, self.tuning.depletion);
                    organism.nutrients_absorbed += consumed;
                    branch.x = nx;
                    branch.y = ny;
                    branch.angle += jitter(&mut self.rng, self.tuning.advance_jitter);
                    branch.boundary_ticks = 0;
                    next.push(branch);

                    let remaining = self.store.nutrient_at(cell);
                    let probability = (organism.profile.branching_probability
                        * (remaining / self.tuning.branch_nutrient_scale))
                        .clamp(0.0, 1.0);
                    if probability > 0.0 && self.rng.random::<f32>() < probability {
                        let sibling = Branch::new(
                            nx,
                            ny,
                            branch.angle + jitter(&mut self.rng, self.tuning.branch_jitter),
                        );
                        next.push(sibling);
                        report.branches_spawned += 1;
                    }
                }
            }
        }
        organism.branches = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypha_core::chemical::canonical_chemicals;
    use hypha_core::species::{SpeciesProfile, SubstratePreference};
    use hypha_core::substrate::SubstrateType;

    /// A species with no branching, unit growth rate, no substrate
    /// preference match, and wide-open optima: growth is exactly 1.0
    /// per tick under the default environment.
    fn probe_species(name: &str) -> SpeciesProfile {
        SpeciesProfile {
            name: name.into(),
            growth_rate: 1.0,
            filament_thickness: 1.0,
            branching_probability: 0.0,
            preferred_substrate: SubstratePreference::Named("nothing".into()),
            merge_probability: 0.0,
            antifungal_potency: 0.0,
            optimal_ph: None,
            optimal_temperature: None,
            optimal_humidity: None,
        }
    }

    fn test_config(seed: u64) -> WorldConfig {
        let species = SpeciesRegistry::new(
            vec![probe_species("probe")],
            vec![probe_species("mold")],
        )
        .unwrap();
        let substrates = SubstrateRegistry::new(vec![
            SubstrateType::new("agar", 100.0),
            SubstrateType::new("straw", 70.0),
        ])
        .unwrap();
        let tuning = GrowthTuning {
            placement_jitter: 0.0,
            advance_jitter: 0.0,
            ..GrowthTuning::default()
        };
        WorldConfig {
            dish_size: 40,
            dish_radius: 18.0,
            species,
            substrates,
            chemicals: canonical_chemicals(),
            initial_substrate: "agar".into(),
            seed,
            max_command_queue: 16,
            max_event_log: 256,
            tuning,
        }
    }

    fn engine(seed: u64) -> TickEngine {
        TickEngine::new(test_config(seed)).unwrap()
    }

    // ── placement ──────────────────────────────────────────────

    #[test]
    fn place_sprouts_initial_tips() {
        let mut engine = engine(1);
        let id = engine.place_organism(20.0, 20.0, "probe", false).unwrap();
        assert_eq!(id, Some(OrganismId(0)));
        let organism = engine.organisms().next().unwrap();
        assert_eq!(organism.branches.len(), 8);
    }

    #[test]
    fn out_of_bounds_placement_is_silent_noop() {
        let mut engine = engine(1);
        let id = engine.place_organism(1.0, 1.0, "probe", false).unwrap();
        assert_eq!(id, None);
        assert_eq!(engine.organisms().count(), 0);
        // No field mutation either.
        let summary = engine.store().summary();
        assert_eq!(summary.nutrient.min, 100.0);
    }

    #[test]
    fn unknown_species_is_rejected() {
        let mut engine = engine(1);
        let err = engine.place_organism(20.0, 20.0, "morel", false).unwrap_err();
        assert!(matches!(err, CommandError::UnknownSpecies { contaminant: false, .. }));
        // A colony name is not visible in the contaminant table.
        let err = engine.place_organism(20.0, 20.0, "probe", true).unwrap_err();
        assert!(matches!(err, CommandError::UnknownSpecies { contaminant: true, .. }));
    }

    #[test]
    fn organism_ids_are_sequential() {
        let mut engine = engine(1);
        let a = engine.place_organism(20.0, 20.0, "probe", false).unwrap();
        let b = engine.place_organism(22.0, 20.0, "mold", true).unwrap();
        assert_eq!(a, Some(OrganismId(0)));
        assert_eq!(b, Some(OrganismId(1)));
    }

    // ── tick mechanics ─────────────────────────────────────────

    #[test]
    fn step_advances_tips_and_depletes_nutrient() {
        let mut engine = engine(1);
        engine.place_organism(20.0, 20.0, "probe", false).unwrap();
        let report = engine.step();
        assert_eq!(report.tick, TickId(1));
        assert!(report.advanced);
        assert_eq!(report.branch_counts, vec![(OrganismId(0), 8)]);
        let organism = engine.organisms().next().unwrap();
        for branch in &organism.branches {
            let dx = branch.x - 20.0;
            let dy = branch.y - 20.0;
            let dist = (dx * dx + dy * dy).sqrt();
            assert!((dist - 1.0).abs() < 1e-4, "tip moved {dist}");
            assert_eq!(branch.age, 1);
        }
        // 8 tips each consumed 0.5 somewhere.
        assert_eq!(organism.nutrients_absorbed, 4.0);
        let summary = engine.store().summary();
        assert!(summary.nutrient.min < 100.0);
    }

    #[test]
    fn zero_growth_stalls_without_killing() {
        let mut engine = engine(1);
        engine.place_organism(20.0, 20.0, "probe", false).unwrap();
        // Push pH fully outside the default tolerance band.
        let update = EnvironmentUpdate {
            ph: Some(10.0),
            ..Default::default()
        };
        engine.set_environment(&update);
        let before: Vec<Branch> = engine.organisms().next().unwrap().branches.to_vec();
        let report = engine.step();
        assert!(report.removed.is_empty());
        let organism = engine.organisms().next().unwrap();
        assert_eq!(organism.branches.len(), 8);
        for (before, after) in before.iter().zip(&organism.branches) {
            assert_eq!((before.x, before.y), (after.x, after.y));
            assert_eq!(after.age, before.age + 1);
        }
    }

    #[test]
    fn boundary_contact_holds_tips_and_counts() {
        let mut engine = engine(1);
        // One cell inside the rim, heading outward.
        engine.place_organism(20.0, 20.0, "probe", false).unwrap();
        for _ in 0..40 {
            engine.step();
        }
        let organism = engine.organisms().next().unwrap();
        assert_eq!(organism.branches.len(), 8);
        for branch in &organism.branches {
            assert!(branch.boundary_ticks > 0, "tip should have hit the rim");
            let dx = branch.x - 20.0;
            let dy = branch.y - 20.0;
            assert!((dx * dx + dy * dy).sqrt() <= 18.0 + 1e-3);
        }
    }

    #[test]
    fn starved_tips_are_dropped() {
        let mut engine = engine(1);
        engine.place_organism(20.0, 20.0, "probe", false).unwrap();
        // Empty every cell so the first advance starves all 8 tips.
        engine.store.reinitialize(0.0);
        let report = engine.step();
        assert_eq!(report.removed, vec![OrganismId(0)]);
        assert_eq!(engine.organisms().count(), 0);
        let starved = report
            .events
            .iter()
            .filter(|e| matches!(e, GrowthEvent::TipStarved { .. }))
            .count();
        assert_eq!(starved, 8);
    }

    #[test]
    fn colonies_process_before_contaminants() {
        let mut engine = engine(1);
        let mold = engine.place_organism(20.0, 20.0, "mold", true).unwrap().unwrap();
        let probe = engine.place_organism(20.0, 20.0, "probe", false).unwrap().unwrap();
        let report = engine.step();
        let order: Vec<OrganismId> = report.branch_counts.iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec![probe, mold]);
    }

    // ── substrate and reset ────────────────────────────────────

    #[test]
    fn set_substrate_reseeds_fields_and_clears_organisms() {
        let mut engine = engine(1);
        engine.place_organism(20.0, 20.0, "probe", false).unwrap();
        engine.step();
        engine.set_substrate("straw").unwrap();
        assert_eq!(engine.organisms().count(), 0);
        assert_eq!(engine.environment().substrate(), "straw");
        let summary = engine.store().summary();
        assert_eq!(summary.substrate_nutrient, 70.0);
        assert_eq!(summary.nutrient.min, 70.0);
        assert_eq!(summary.nutrient.max, 70.0);
        // Tick counter survives a substrate change.
        assert_eq!(engine.tick(), TickId(1));
    }

    #[test]
    fn set_substrate_unknown_name_leaves_world_untouched() {
        let mut engine = engine(1);
        engine.place_organism(20.0, 20.0, "probe", false).unwrap();
        engine.step();
        let before = engine.snapshot(false);
        let err = engine.set_substrate("vermiculite").unwrap_err();
        assert!(matches!(err, CommandError::UnknownSubstrate { .. }));
        assert_eq!(engine.snapshot(false), before);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut world = engine(7);
        world.place_organism(20.0, 20.0, "probe", false).unwrap();
        for _ in 0..5 {
            world.step();
        }
        world.reset();
        assert_eq!(world.tick(), TickId(0));
        assert_eq!(world.organisms().count(), 0);
        let summary = world.store().summary();
        assert_eq!(summary.nutrient.min, 100.0);
        assert_eq!(summary.nutrient.max, 100.0);
    }

    #[test]
    fn reset_replays_bit_identically() {
        let run = |e: &mut TickEngine| {
            e.place_organism(20.0, 20.0, "probe", false).unwrap();
            e.step();
            e.snapshot(false)
        };
        let mut fresh = engine(7);
        let a = run(&mut fresh);

        let mut recycled = engine(7);
        recycled.place_organism(20.0, 20.0, "probe", false).unwrap();
        for _ in 0..5 {
            recycled.step();
        }
        recycled.reset();
        let b = run(&mut recycled);
        assert_eq!(a, b);
    }

    // ── chemicals ──────────────────────────────────────────────

    #[test]
    fn set_chemical_validates_name_before_bounds() {
        let mut engine = engine(1);
        // Unknown chemical is rejected even out of bounds.
        let err = engine.set_chemical("ethanol", 1.0, 1.0, 5.0).unwrap_err();
        assert!(matches!(err, CommandError::UnknownChemical { .. }));
        // Known chemical out of bounds is silently ignored.
        engine.set_chemical("oxygen", 1.0, 1.0, 5.0).unwrap();
        let summary = engine.store().summary();
        let oxygen = summary.chemicals.iter().find(|(n, _)| n == "oxygen").unwrap();
        assert_eq!(oxygen.1.min, 100.0);
    }
}
