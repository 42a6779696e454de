//! Injected telemetry.
//!
//! The core never reaches for a global counter: a small trait is injected
//! at `Parser` construction time instead, scoped to this core's own
//! concerns. `NoopTelemetry` is the default for tests and library consumers
//! who don't care; `CountingTelemetry` is a ready-made in-memory
//! implementation for hosts that want cheap observability without wiring a
//! metrics backend.

use crate::scc::error::RejectionReason;
use std::collections::HashMap;
use std::sync::Mutex;

/// Which shape a successfully classified transaction was emitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmissionKind {
    Single,
    SplitSell,
    SplitBuy,
}

impl std::fmt::Display for EmissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EmissionKind::Single => "single",
            EmissionKind::SplitSell => "split_sell",
            EmissionKind::SplitBuy => "split_buy",
        };
        write!(f, "{}", s)
    }
}

/// One callback per pipeline milestone. Implementations must not block or
/// panic — they run on the hot classification path.
pub trait Telemetry: Send + Sync {
    /// Called once a `RawTx` has cleared ingest (status == Success).
    fn on_ingested(&self) {}

    /// Called when a transaction is rejected, with the reason.
    fn on_erased(&self, _reason: &RejectionReason) {}

    /// Called when a transaction is successfully classified and emitted.
    fn on_emitted(&self, _kind: EmissionKind) {}
}

/// Discards every event. The default for tests and callers who don't need
/// observability.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl Telemetry for NoopTelemetry {}

/// An in-memory counter, keyed per rejection reason and emission kind.
#[derive(Debug, Default)]
pub struct CountingTelemetry {
    ingested: Mutex<u64>,
    erased: Mutex<HashMap<RejectionReason, u64>>,
    emitted: Mutex<HashMap<EmissionKind, u64>>,
}

impl CountingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingested_count(&self) -> u64 {
        *self.ingested.lock().expect("telemetry mutex poisoned")
    }

    pub fn erased_count(&self, reason: RejectionReason) -> u64 {
        self.erased
            .lock()
            .expect("telemetry mutex poisoned")
            .get(&reason)
            .copied()
            .unwrap_or(0)
    }

    pub fn emitted_count(&self, kind: EmissionKind) -> u64 {
        self.emitted
            .lock()
            .expect("telemetry mutex poisoned")
            .get(&kind)
            .copied()
            .unwrap_or(0)
    }
}

impl Telemetry for CountingTelemetry {
    fn on_ingested(&self) {
        *self.ingested.lock().expect("telemetry mutex poisoned") += 1;
    }

    fn on_erased(&self, reason: &RejectionReason) {
        *self
            .erased
            .lock()
            .expect("telemetry mutex poisoned")
            .entry(*reason)
            .or_insert(0) += 1;
    }

    fn on_emitted(&self, kind: EmissionKind) {
        *self
            .emitted
            .lock()
            .expect("telemetry mutex poisoned")
            .entry(kind)
            .or_insert(0) += 1;
    }
}
