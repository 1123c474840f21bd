//! The user-facing simulation world.
//!
//! [`World`] wraps the [`TickEngine`] with the command queue, the retained
//! event log, cumulative metrics, and the pause flag. It exposes the
//! engine's external contract: place an organism, step the clock, change
//! environment parameters, change substrate, reset, and read a snapshot.
//!
//! # Ownership model
//!
//! `World` is `Send` but all mutating methods take `&mut self`, so the
//! borrow checker guarantees commands can never interleave with an
//! in-progress tick. Hosts that buffer input (e.g. UI sliders firing
//! while a tick runs on another turn of the event loop) go through
//! [`submit()`](World::submit); buffered commands are applied in arrival
//! order at the next [`step()`](World::step) boundary.

use hypha_core::command::{CommandPayload, Receipt};
use hypha_core::environment::EnvironmentUpdate;
use hypha_core::error::CommandError;
use hypha_core::event::GrowthEvent;
use hypha_core::id::{OrganismId, TickId};

use crate::config::{ConfigError, WorldConfig};
use crate::ingress::CommandQueue;
use crate::metrics::WorldMetrics;
use crate::report::TickReport;
use crate::snapshot::EngineSnapshot;
use crate::tick::TickEngine;

/// A complete simulation world: engine, command queue, event log, and
/// metrics.
pub struct World {
    engine: TickEngine,
    queue: CommandQueue,
    events: Vec<GrowthEvent>,
    metrics: WorldMetrics,
    paused: bool,
    max_event_log: usize,
}

impl World {
    /// Build a world from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if validation fails.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let max_command_queue = config.max_command_queue;
        let max_event_log = config.max_event_log;
        let engine = TickEngine::new(config)?;
        Ok(Self {
            engine,
            queue: CommandQueue::new(max_command_queue),
            events: Vec::new(),
            metrics: WorldMetrics::default(),
            paused: false,
            max_event_log,
        })
    }

    /// Place an organism at `(x, y)`, resolved against the colony or
    /// contaminant species table.
    ///
    /// Out-of-bounds positions return `Ok(None)` without touching any
    /// state. A successful placement resumes a paused clock.
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
        let result = self.engine.place_organism(x, y, species, contaminant);
        match &result {
            Ok(Some(_)) => {
                self.metrics.organisms_placed += 1;
                self.paused = false;
            }
            Ok(None) => {}
            Err(_) => self.metrics.commands_rejected += 1,
        }
        result
    }

    /// Partially update the ambient environment; unset fields keep their
    /// prior value, and every value is clamped to its bounded range.
    pub fn set_environment(&mut self, update: EnvironmentUpdate) {
        self.engine.set_environment(&update);
    }

    /// Switch the active substrate, reinitializing every field layer and
    /// clearing all organisms. The tick counter and event log survive;
    /// only [`reset()`](World::reset) clears those.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownSubstrate`] for an unregistered
    /// name; the world is left untouched.
    pub fn set_substrate(&mut self, name: &str) -> Result<(), CommandError> {
        let result = self.engine.set_substrate(name);
        if result.is_err() {
            self.metrics.commands_rejected += 1;
        }
        result
    }

    /// Set a chemical layer at the cell under `(x, y)`. Out-of-bounds
    /// positions are silently ignored, mirroring placement.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownChemical`] for an unregistered name.
    pub fn set_chemical(
        &mut self,
        chemical: &str,
        x: f32,
        y: f32,
        value: f32,
    ) -> Result<(), CommandError> {
        let result = self.engine.set_chemical(chemical, x, y, value);
        if result.is_err() {
            self.metrics.commands_rejected += 1;
        }
        result
    }

    /// Pause or resume the clock. A paused world ignores `step()`.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether the clock is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Reinitialize fields from the active substrate, clear organisms,
    /// zero the tick counter, clear the event log, metrics, and any
    /// pending commands, reseed the RNG, and resume the clock.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.queue.clear();
        self.events.clear();
        self.metrics = WorldMetrics::default();
        self.paused = false;
    }

    /// Buffer a batch of commands for the next tick boundary.
    ///
    /// Returns one acceptance receipt per command; commands beyond the
    /// queue capacity are rejected with [`CommandError::QueueFull`].
    /// Application outcomes (created organisms, unknown names) arrive in
    /// the next [`step()`](World::step) report.
    pub fn submit(&mut self, payloads: Vec<CommandPayload>) -> Vec<Receipt> {
        let receipts = self.queue.submit(payloads);
        self.metrics.commands_rejected +=
            receipts.iter().filter(|r| !r.accepted).count() as u64;
        receipts
    }

    /// Apply buffered commands, then advance one tick.
    ///
    /// On a paused world the commands still apply (a buffered placement
    /// resumes the clock), but organisms do not advance and the tick
    /// counter is unchanged.
    pub fn step(&mut self) -> TickReport {
        let applied = self.apply_queued();
        let mut report = if self.paused {
            TickReport {
                tick: self.engine.tick(),
                advanced: false,
                ..Default::default()
            }
        } else {
            self.engine.step()
        };
        report.applied = applied;

        self.metrics.organisms_removed += report.removed.len() as u64;
        self.metrics.branches_spawned += u64::from(report.branches_spawned);
        for event in &report.events {
            match event {
                GrowthEvent::FruitingCandidate { .. } => self.metrics.fruiting_events += 1,
                GrowthEvent::TipStarved { .. } => self.metrics.starved_tips += 1,
            }
        }
        self.events.extend(report.events.iter().cloned());
        if self.events.len() > self.max_event_log {
            let excess = self.events.len() - self.max_event_log;
            self.events.drain(..excess);
        }
        report
    }

    /// Read-only projection of the current state. Never mutates the
    /// world: two snapshots with no intervening command or step compare
    /// equal.
    pub fn snapshot(&self) -> EngineSnapshot {
        self.engine.snapshot(self.paused)
    }

    /// Ticks elapsed since construction or the last reset.
    pub fn tick(&self) -> TickId {
        self.engine.tick()
    }

    /// The retained event log, oldest first. Bounded by the configured
    /// length; cleared only by [`reset()`](World::reset).
    pub fn events(&self) -> &[GrowthEvent] {
        &self.events
    }

    /// Cumulative counters since construction or the last reset.
    pub fn metrics(&self) -> &WorldMetrics {
        &self.metrics
    }

    /// The configured seed.
    pub fn seed(&self) -> u64 {
        self.engine.seed()
    }

    fn apply_queued(&mut self) -> Vec<Receipt> {
        let mut receipts = Vec::new();
        for queued in self.queue.drain() {
            let index = queued.command_index;
            let receipt = match queued.command.payload {
                CommandPayload::PlaceOrganism {
                    x,
                    y,
                    species,
                    contaminant,
                } => match self.place_organism(x, y, &species, contaminant) {
                    Ok(organism) => Receipt {
                        accepted: true,
                        organism,
                        reason: None,
                        command_index: index,
                    },
                    Err(reason) => Receipt::rejected(index, reason),
                },
                CommandPayload::SetEnvironment(update) => {
                    self.set_environment(update);
                    Receipt::accepted(index)
                }
                CommandPayload::SetSubstrate { name } => match self.set_substrate(&name) {
                    Ok(()) => Receipt::accepted(index),
                    Err(reason) => Receipt::rejected(index, reason),
                },
                CommandPayload::SetChemical {
                    chemical,
                    x,
                    y,
                    value,
                } => match self.set_chemical(&chemical, x, y, value) {
                    Ok(()) => Receipt::accepted(index),
                    Err(reason) => Receipt::rejected(index, reason),
                },
                CommandPayload::SetPaused { paused } => {
                    self.set_paused(paused);
                    Receipt::accepted(index)
                }
                CommandPayload::Reset => {
                    self.reset();
                    Receipt::accepted(index)
                }
            };
            receipts.push(receipt);
        }
        receipts
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("tick", &self.engine.tick())
            .field("seed", &self.engine.seed())
            .field("paused", &self.paused)
            .field("pending_commands", &self.queue.len())
            .finish()
    }
}
