//! Bounded command queue applied at tick boundaries.
//!
//! [`CommandQueue`] buffers commands between submission and the next
//! `step()`. Commands are applied strictly in arrival order; a full queue
//! rejects further commands with a receipt rather than dropping them
//! silently. Because the engine is single-threaded and every mutating
//! method takes `&mut self`, buffered commands can never interleave with
//! an in-progress tick.

use std::collections::VecDeque;

use hypha_core::command::{Command, CommandPayload, Receipt};
use hypha_core::error::CommandError;

/// A command paired with its batch-local index from `submit()`.
#[derive(Debug)]
pub struct QueuedCommand {
    /// The command to apply.
    pub command: Command,
    /// The original batch-local index from the `submit()` call.
    pub command_index: usize,
}

/// Bounded FIFO queue for the command surface.
pub struct CommandQueue {
    queue: VecDeque<QueuedCommand>,
    capacity: usize,
    next_arrival_seq: u64,
}

impl CommandQueue {
    /// Create a queue with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; `WorldConfig::validate` rejects that
    /// before a world is built.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "CommandQueue capacity must be at least 1");
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
            next_arrival_seq: 0,
        }
    }

    /// Submit a batch of payloads.
    ///
    /// Returns one [`Receipt`] per payload. Payloads are accepted in order
    /// until the queue is full; the rest are rejected with
    /// [`CommandError::QueueFull`]. Accepted receipts report acceptance
    /// only; outcomes (created organisms, rejected names) arrive in the
    /// next tick's report.
    pub fn submit(&mut self, payloads: Vec<CommandPayload>) -> Vec<Receipt> {
        let mut receipts = Vec::with_capacity(payloads.len());
        for (i, payload) in payloads.into_iter().enumerate() {
            if self.queue.len() >= self.capacity {
                receipts.push(Receipt::rejected(i, CommandError::QueueFull));
                continue;
            }
            let command = Command {
                payload,
                arrival_seq: self.next_arrival_seq,
            };
            self.next_arrival_seq += 1;
            self.queue.push_back(QueuedCommand {
                command,
                command_index: i,
            });
            receipts.push(Receipt::accepted(i));
        }
        receipts
    }

    /// Take every buffered command, in arrival order.
    pub fn drain(&mut self) -> Vec<QueuedCommand> {
        self.queue.drain(..).collect()
    }

    /// Discard all pending commands. Called during `reset()` so stale
    /// commands do not survive into the fresh world.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Number of commands currently buffered.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Maximum number of commands this queue can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reset_cmd() -> CommandPayload {
        CommandPayload::Reset
    }

    // ── submit ─────────────────────────────────────────────────

    #[test]
    fn submit_assigns_monotonic_arrival_seq() {
        let mut q = CommandQueue::new(10);
        q.submit(vec![reset_cmd(), reset_cmd()]);
        q.submit(vec![reset_cmd()]);
        let drained = q.drain();
        let seqs: Vec<u64> = drained.iter().map(|c| c.command.arrival_seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
    }

    #[test]
    fn submit_rejects_when_full() {
        let mut q = CommandQueue::new(2);
        let receipts = q.submit(vec![reset_cmd(), reset_cmd(), reset_cmd()]);
        assert!(receipts[0].accepted);
        assert!(receipts[1].accepted);
        assert!(!receipts[2].accepted);
        assert_eq!(receipts[2].reason, Some(CommandError::QueueFull));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn receipt_command_index_matches_input() {
        let mut q = CommandQueue::new(1);
        let receipts = q.submit(vec![reset_cmd(), reset_cmd()]);
        assert_eq!(receipts[0].command_index, 0);
        assert_eq!(receipts[1].command_index, 1);
    }

    // ── drain / clear ──────────────────────────────────────────

    #[test]
    fn drain_preserves_fifo_order_and_empties_queue() {
        let mut q = CommandQueue::new(10);
        q.submit(vec![
            CommandPayload::SetSubstrate { name: "straw".into() },
            reset_cmd(),
        ]);
        let drained = q.drain();
        assert_eq!(drained.len(), 2);
        assert!(matches!(
            drained[0].command.payload,
            CommandPayload::SetSubstrate { .. }
        ));
        assert!(matches!(drained[1].command.payload, CommandPayload::Reset));
        assert!(q.is_empty());
    }

    #[test]
    fn clear_discards_pending_commands() {
        let mut q = CommandQueue::new(10);
        q.submit(vec![reset_cmd(), reset_cmd()]);
        q.clear();
        assert!(q.is_empty());
        assert!(q.drain().is_empty());
    }

    #[test]
    fn capacity_reports_configured_value() {
        let q = CommandQueue::new(7);
        assert_eq!(q.capacity(), 7);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_submission_gets_a_receipt(
                count in 0usize..64,
                capacity in 1usize..32,
            ) {
                let mut q = CommandQueue::new(capacity);
                let receipts = q.submit(vec![CommandPayload::Reset; count]);
                prop_assert_eq!(receipts.len(), count);
                let accepted = receipts.iter().filter(|r| r.accepted).count();
                prop_assert_eq!(accepted, count.min(capacity));
                prop_assert_eq!(q.len(), accepted);
            }
        }
    }
}
