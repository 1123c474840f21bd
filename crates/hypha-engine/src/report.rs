//! The per-tick report returned by `step()`.

use hypha_core::command::Receipt;
use hypha_core::event::GrowthEvent;
use hypha_core::id::{OrganismId, TickId};

/// Summary of one tick, consumable by renderers and exporters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// The tick this report describes. Unchanged from the previous report
    /// when the world was paused.
    pub tick: TickId,
    /// Whether the tick actually advanced (false on a paused world).
    pub advanced: bool,
    /// Receipts for queued commands applied at this tick boundary.
    pub applied: Vec<Receipt>,
    /// Organisms whose branch list emptied this tick, in processing order.
    pub removed: Vec<OrganismId>,
    /// Branch count per surviving organism, in processing order.
    pub branch_counts: Vec<(OrganismId, u32)>,
    /// Sibling branches spawned this tick.
    pub branches_spawned: u32,
    /// Events emitted this tick (fruiting candidates, starved tips).
    pub events: Vec<GrowthEvent>,
}
