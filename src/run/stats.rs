//! Run statistics.
//!
//! Plain counters, not atomics: the run is strictly sequential and the
//! stats are owned by the coordinator.

/// Counters accumulated over one run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunStats {
    datasets_processed: u64,
    files_downloaded: u64,
    files_skipped: u64,
    errors: u64,
    total_bytes: u64,
}

impl RunStats {
    /// Records one processed dataset.
    pub fn record_dataset(&mut self) {
        self.datasets_processed += 1;
    }

    /// Records one completed download of `bytes` bytes.
    pub fn record_downloaded(&mut self, bytes: u64) {
        self.files_downloaded += 1;
        self.total_bytes += bytes;
    }

    /// Records one artifact skipped by the resume gate.
    pub fn record_skipped(&mut self) {
        self.files_skipped += 1;
    }

    /// Records one failed distribution.
    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Number of datasets processed.
    #[must_use]
    pub fn datasets_processed(&self) -> u64 {
        self.datasets_processed
    }

    /// Number of artifacts downloaded this run.
    #[must_use]
    pub fn files_downloaded(&self) -> u64 {
        self.files_downloaded
    }

    /// Number of artifacts skipped as already complete.
    #[must_use]
    pub fn files_skipped(&self) -> u64 {
        self.files_skipped
    }

    /// Number of distributions that failed.
    #[must_use]
    pub fn errors(&self) -> u64 {
        self.errors
    }

    /// Total bytes written by downloads this run.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate() {
        let mut stats = RunStats::default();
        stats.record_dataset();
        stats.record_downloaded(100);
        stats.record_downloaded(50);
        stats.record_skipped();
        stats.record_error();

        assert_eq!(stats.datasets_processed(), 1);
        assert_eq!(stats.files_downloaded(), 2);
        assert_eq!(stats.total_bytes(), 150);
        assert_eq!(stats.files_skipped(), 1);
        assert_eq!(stats.errors(), 1);
    }
}
