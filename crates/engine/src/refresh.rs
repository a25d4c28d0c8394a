//! Refresh gate for the external activity poll.
//!
//! The engine itself is synchronous: a recompute is simply the caller
//! re-invoking [`derive_all`](crate::balance::derive_all) with a fresh
//! snapshot. This module owns the engine-side contract of the periodic poll
//! that triggers it:
//!
//! - a single in-flight check at a time;
//! - paused while the consuming surface is inactive or a blocking
//!   interaction is open;
//! - exactly one cascade recompute per detected change, not one per changed
//!   field.
//!
//! The ledger version is an opaque marker (the id of the newest activity)
//! the caller fetches cheaply and feeds into [`RefreshGate::observe`].

/// What the caller should do after observing the latest ledger version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshAction {
    /// Nothing changed (or the gate just primed on its first observation).
    Unchanged,
    /// The ledger moved: run one cascade recompute with a fresh snapshot.
    Recompute,
}

/// Sequential bookkeeping for the best-effort activity poll.
#[derive(Clone, Debug, Default)]
pub struct RefreshGate {
    last_seen: Option<String>,
    in_flight: bool,
    paused: bool,
}

impl RefreshGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tries to start a poll; refuses while one is in flight or the gate is
    /// paused.
    pub fn begin_poll(&mut self) -> bool {
        if self.in_flight || self.paused {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Marks the in-flight poll as finished.
    pub fn finish_poll(&mut self) {
        self.in_flight = false;
    }

    /// Pauses polling while the consuming surface is inactive or blocked.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Feeds the newest ledger version into the gate.
    ///
    /// The first observation primes the gate without triggering; afterwards a
    /// changed version yields exactly one [`RefreshAction::Recompute`]. A
    /// paused gate ignores observations entirely (without recording the
    /// version), so a change that lands during a pause still triggers on the
    /// first observation after [`RefreshGate::resume`].
    pub fn observe(&mut self, version: &str) -> RefreshAction {
        if self.paused {
            return RefreshAction::Unchanged;
        }
        match self.last_seen.as_deref() {
            None => {
                self.last_seen = Some(version.to_string());
                RefreshAction::Unchanged
            }
            Some(seen) if seen == version => RefreshAction::Unchanged,
            Some(_) => {
                tracing::debug!(%version, "ledger version changed, cascading recompute");
                self.last_seen = Some(version.to_string());
                RefreshAction::Recompute
            }
        }
    }
}
