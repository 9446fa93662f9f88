use chrono::{DateTime, TimeDelta, Utc};

/// Delay before a pending load shows its spinner.
pub const DEFAULT_SPINNER_DELAY_MS: i64 = 200;

/// Tag attached to one load request. Only the newest tag may apply its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    /// Returns the raw tag value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Timer-gated spinner visibility.
///
/// The spinner only becomes visible once a load has been running for longer
/// than the configured delay, so fast responses never flash it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingIndicator {
    delay: TimeDelta,
    started_at: Option<DateTime<Utc>>,
}

impl LoadingIndicator {
    /// Creates an indicator with a custom delay.
    #[must_use]
    pub fn new(delay: TimeDelta) -> Self {
        Self {
            delay,
            started_at: None,
        }
    }

    /// Marks a load as started at `now`.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
    }

    /// Marks the load as finished and hides the spinner.
    pub fn finish(&mut self) {
        self.started_at = None;
    }

    /// Returns whether a load is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns whether the spinner should be shown at `now`.
    #[must_use]
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.started_at
            .is_some_and(|started_at| now - started_at >= self.delay)
    }
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new(TimeDelta::milliseconds(DEFAULT_SPINNER_DELAY_MS))
    }
}

/// Issues request generations and tracks the one currently in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadTracker {
    latest: u64,
    in_flight: Option<RequestGeneration>,
    indicator: LoadingIndicator,
}

impl LoadTracker {
    /// Starts a new load, superseding any load still in flight.
    pub fn begin(&mut self, now: DateTime<Utc>) -> RequestGeneration {
        self.latest = self.latest.saturating_add(1);
        let generation = RequestGeneration(self.latest);
        self.in_flight = Some(generation);
        self.indicator.start(now);
        generation
    }

    /// Completes a load. Returns `false` when the response is stale and must be discarded.
    pub fn complete(&mut self, generation: RequestGeneration) -> bool {
        if !self.is_current(generation) {
            return false;
        }

        self.in_flight = None;
        self.indicator.finish();
        true
    }

    /// Returns whether `generation` is the newest one issued.
    #[must_use]
    pub fn is_current(&self, generation: RequestGeneration) -> bool {
        generation.0 == self.latest
    }

    /// Returns whether a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns whether the spinner should be shown at `now`.
    #[must_use]
    pub fn spinner_visible(&self, now: DateTime<Utc>) -> bool {
        self.indicator.is_visible(now)
    }
}
