//! Lookup counters for geocode-fields

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::error::Error;

/// Counters describing how lookups have ended
#[derive(Debug)]
pub struct PipelineStats {
    started: Instant,
    lookups: AtomicUsize,
    classified: AtomicUsize,
    status_failures: AtomicUsize,
    classification_failures: AtomicUsize,
    transport_failures: AtomicUsize,
    other_failures: AtomicUsize,
    total_geocode_time: AtomicU64, // microseconds
}

impl PipelineStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            lookups: AtomicUsize::new(0),
            classified: AtomicUsize::new(0),
            status_failures: AtomicUsize::new(0),
            classification_failures: AtomicUsize::new(0),
            transport_failures: AtomicUsize::new(0),
            other_failures: AtomicUsize::new(0),
            total_geocode_time: AtomicU64::new(0),
        }
    }

    /// Record one geocoder round trip
    pub fn record_geocode(&self, duration: Duration) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.total_geocode_time
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// Record a successfully classified address
    pub fn record_success(&self) {
        self.classified.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed lookup under the matching counter
    pub fn record_failure(&self, error: &Error) {
        let counter = match error {
            Error::GeocodeStatusError { .. } => &self.status_failures,
            Error::ClassificationError { .. } => &self.classification_failures,
            e if e.is_transport() => &self.transport_failures,
            _ => &self.other_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of the counters
    pub fn summary(&self) -> StatsSummary {
        let lookups = self.lookups.load(Ordering::Relaxed);
        let total_geocode_time_us = self.total_geocode_time.load(Ordering::Relaxed);

        StatsSummary {
            lookups,
            classified: self.classified.load(Ordering::Relaxed),
            status_failures: self.status_failures.load(Ordering::Relaxed),
            classification_failures: self.classification_failures.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
            other_failures: self.other_failures.load(Ordering::Relaxed),
            average_geocode_time: if lookups > 0 {
                Duration::from_micros(total_geocode_time_us / lookups as u64)
            } else {
                Duration::ZERO
            },
            uptime: self.started.elapsed(),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.lookups,
            &self.classified,
            &self.status_failures,
            &self.classification_failures,
            &self.transport_failures,
            &self.other_failures,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
        self.total_geocode_time.store(0, Ordering::Relaxed);
    }
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of [`PipelineStats`]
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    /// Geocoder round trips attempted
    pub lookups: usize,
    /// Addresses classified successfully
    pub classified: usize,
    /// Lookups stopped by a non-OK provider status
    pub status_failures: usize,
    /// Lookups whose components did not fit a template
    pub classification_failures: usize,
    /// Lookups that never got a usable response
    pub transport_failures: usize,
    /// Malformed responses and rejected input
    pub other_failures: usize,
    /// Mean geocoder round-trip time
    pub average_geocode_time: Duration,
    /// Time since the counters were created
    pub uptime: Duration,
}

impl StatsSummary {
    /// Total failed lookups
    pub fn failures(&self) -> usize {
        self.status_failures
            + self.classification_failures
            + self.transport_failures
            + self.other_failures
    }

    /// Fraction of finished lookups that produced an address
    pub fn success_rate(&self) -> f64 {
        let finished = self.classified + self.failures();
        if finished > 0 {
            self.classified as f64 / finished as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatusCode;

    #[test]
    fn test_counts_by_failure_kind() {
        let stats = PipelineStats::new();

        stats.record_geocode(Duration::from_micros(300));
        stats.record_geocode(Duration::from_micros(100));
        stats.record_success();
        stats.record_failure(&Error::GeocodeStatusError {
            status: StatusCode::ZeroResults,
        });
        stats.record_failure(&Error::network_error("refused"));
        stats.record_failure(&Error::malformed_response("no status"));

        let summary = stats.summary();
        assert_eq!(summary.lookups, 2);
        assert_eq!(summary.classified, 1);
        assert_eq!(summary.status_failures, 1);
        assert_eq!(summary.transport_failures, 1);
        assert_eq!(summary.other_failures, 1);
        assert_eq!(summary.failures(), 3);
        assert_eq!(summary.average_geocode_time, Duration::from_micros(200));
        assert_eq!(summary.success_rate(), 0.25);
    }

    #[test]
    fn test_reset() {
        let stats = PipelineStats::new();
        stats.record_geocode(Duration::from_millis(1));
        stats.record_success();
        stats.reset();

        let summary = stats.summary();
        assert_eq!(summary.lookups, 0);
        assert_eq!(summary.classified, 0);
        assert_eq!(summary.average_geocode_time, Duration::ZERO);
        assert_eq!(summary.success_rate(), 0.0);
    }
}
