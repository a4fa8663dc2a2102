//! Load-balance statistics
//!
//! Reduces the final per-disk counters to the spread between the least and
//! most loaded surviving disks. Disk 0 is the failed reference disk and never
//! takes part in min or max.

use crate::error::SimError;
use serde::Serialize;

/// Summary of one run's rebuild load
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadStatistics {
    /// Least loaded surviving disk
    pub min: u64,
    /// Most loaded surviving disk
    pub max: u64,
    /// `max - min`
    pub spread: u64,
    /// `100 * (max - min) / max`
    pub spread_percent: f64,
    /// Sum over all disks
    pub total_reads: u64,
}

impl LoadStatistics {
    /// Compute statistics from a counter array
    ///
    /// # Errors
    ///
    /// [`SimError::DegenerateStatistics`] when there is no surviving disk or
    /// no surviving disk was read at all.
    pub fn from_counters(counters: &[u64]) -> Result<Self, SimError> {
        let survivors = counters.get(1..).unwrap_or(&[]);

        let (min, max) = match (survivors.iter().min(), survivors.iter().max()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => {
                return Err(SimError::DegenerateStatistics(format!(
                    "{} disk(s) leave no surviving disk to compare",
                    counters.len()
                )))
            }
        };

        if max == 0 {
            return Err(SimError::DegenerateStatistics(
                "no rebuild reads were recorded".into(),
            ));
        }

        let spread = max - min;
        Ok(Self {
            min,
            max,
            spread,
            spread_percent: spread as f64 * 100.0 / max as f64,
            total_reads: counters.iter().sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_basic() {
        let stats = LoadStatistics::from_counters(&[0, 80, 100, 90]).unwrap();
        assert_eq!(stats.min, 80);
        assert_eq!(stats.max, 100);
        assert_eq!(stats.spread, 20);
        assert!((stats.spread_percent - 20.0).abs() < 1e-9);
        assert_eq!(stats.total_reads, 270);
    }

    #[test]
    fn test_statistics_skip_reference_disk() {
        // Disk 0 would otherwise be both min and max
        let stats = LoadStatistics::from_counters(&[1000, 5, 5]).unwrap();
        assert_eq!(stats.min, 5);
        assert_eq!(stats.max, 5);
        assert_eq!(stats.spread, 0);
        assert_eq!(stats.spread_percent, 0.0);
    }

    #[test]
    fn test_statistics_all_zero() {
        let err = LoadStatistics::from_counters(&[0, 0, 0]).unwrap_err();
        assert!(matches!(err, SimError::DegenerateStatistics(_)));
    }

    #[test]
    fn test_statistics_no_survivors() {
        assert!(matches!(
            LoadStatistics::from_counters(&[3]),
            Err(SimError::DegenerateStatistics(_))
        ));
        assert!(matches!(
            LoadStatistics::from_counters(&[]),
            Err(SimError::DegenerateStatistics(_))
        ));
    }
}
