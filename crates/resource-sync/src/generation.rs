//! Monotonic request generations for detecting stale fetches.
//!
//! Every fetch takes a [`Ticket`] when it is issued. Applying a fetch result or a mutation
//! advances the *applied* mark. A fetch result is current only if nothing newer has been
//! applied since its ticket was issued; otherwise it would overwrite fresher local state.

/// Position of a request in the controller's issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct Generation {
    issued: u64,
    applied: u64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// True if no newer fetch or mutation has been applied since `ticket` was issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 > self.applied
    }

    pub fn mark_applied(&mut self, ticket: Ticket) {
        self.applied = self.applied.max(ticket.0);
    }

    /// Record a locally applied mutation. Fetches issued before it become stale.
    pub fn record_mutation(&mut self) -> Ticket {
        let ticket = self.issue();
        self.mark_applied(ticket);
        ticket
    }
}
