//! Cumulative counters for telemetry.

/// Counters accumulated across the life of a world.
///
/// The engine updates these after each `step()` and command application;
/// hosts read them for dashboards and health checks. Cleared by `reset()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldMetrics {
    /// Organisms successfully placed.
    pub organisms_placed: u64,
    /// Organisms removed after their branch list emptied.
    pub organisms_removed: u64,
    /// Sibling branches spawned during growth.
    pub branches_spawned: u64,
    /// Branch tips dropped by starvation.
    pub starved_tips: u64,
    /// Fruiting-candidate events emitted.
    pub fruiting_events: u64,
    /// Commands rejected at submission or application.
    pub commands_rejected: u64,
}
