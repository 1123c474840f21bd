//! Command, payload, and receipt types for the ingress queue.

use crate::environment::EnvironmentUpdate;
use crate::error::CommandError;
use crate::id::OrganismId;

/// A command buffered for application at the next tick boundary.
///
/// `arrival_seq` is a monotonic counter assigned by the queue; commands
/// are applied strictly in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    /// The operation to perform.
    pub payload: CommandPayload,
    /// Monotonic arrival sequence number, set by the queue.
    pub arrival_seq: u64,
}

/// All command payloads accepted by the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandPayload {
    /// Place a new organism at a position.
    ///
    /// Out-of-bounds positions are silently ignored; an unknown species
    /// name is rejected with [`CommandError::UnknownSpecies`].
    PlaceOrganism {
        /// x coordinate in the dish bounding box.
        x: f32,
        /// y coordinate in the dish bounding box.
        y: f32,
        /// Species name, resolved against the table selected by
        /// `contaminant`.
        species: String,
        /// Whether to resolve against the contaminant table.
        contaminant: bool,
    },
    /// Partially update the ambient environment parameters.
    SetEnvironment(EnvironmentUpdate),
    /// Switch the active substrate, reinitializing all fields and
    /// clearing every organism.
    SetSubstrate {
        /// The substrate name.
        name: String,
    },
    /// Set a chemical layer's concentration at one cell. Out-of-bounds
    /// positions are silently ignored, mirroring placement semantics.
    SetChemical {
        /// The chemical layer name.
        chemical: String,
        /// x coordinate in the dish bounding box.
        x: f32,
        /// y coordinate in the dish bounding box.
        y: f32,
        /// New concentration, clamped to >= 0.
        value: f32,
    },
    /// Pause or resume the clock. Paused worlds ignore `step()` until
    /// resumed (placing an organism also resumes).
    SetPaused {
        /// The new paused state.
        paused: bool,
    },
    /// Reinitialize fields from the active substrate, clear organisms,
    /// zero the tick counter, and clear the event log.
    Reset,
}

/// Outcome of one submitted command.
#[derive(Clone, Debug, PartialEq)]
pub struct Receipt {
    /// Whether the command was accepted and applied.
    ///
    /// An out-of-bounds placement is `accepted` with no `organism`:
    /// the documented silent no-op.
    pub accepted: bool,
    /// The organism created, for an applied `PlaceOrganism`.
    pub organism: Option<OrganismId>,
    /// Why the command was rejected, if it was.
    pub reason: Option<CommandError>,
    /// Index of this command within the submitted batch.
    pub command_index: usize,
}

impl Receipt {
    /// An accepted receipt with no created organism.
    pub fn accepted(command_index: usize) -> Self {
        Self {
            accepted: true,
            organism: None,
            reason: None,
            command_index,
        }
    }

    /// A rejected receipt carrying its reason.
    pub fn rejected(command_index: usize, reason: CommandError) -> Self {
        Self {
            accepted: false,
            organism: None,
            reason: Some(reason),
            command_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_constructors() {
        let ok = Receipt::accepted(3);
        assert!(ok.accepted);
        assert_eq!(ok.command_index, 3);
        assert!(ok.reason.is_none());

        let bad = Receipt::rejected(1, CommandError::QueueFull);
        assert!(!bad.accepted);
        assert_eq!(bad.reason, Some(CommandError::QueueFull));
    }

    #[test]
    fn payload_variants_compare() {
        let a = CommandPayload::SetSubstrate { name: "straw".into() };
        let b = CommandPayload::SetSubstrate { name: "straw".into() };
        assert_eq!(a, b);
        assert_ne!(a, CommandPayload::Reset);
    }
}
