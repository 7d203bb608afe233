//! Rolling sample history and derived statistics.

use crate::probe::{is_success, Sample};

use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

/// Maximum samples retained per target.
pub const HISTORY_WINDOW: usize = 100;

/// Per-target aggregate statistics over the rolling window.
///
/// Latency fields are absent when the window holds no successful sample;
/// packet loss is always computable once a sample exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetStats {
    /// Mean latency over successful samples.
    pub avg: Option<f64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// Population standard deviation over successful samples (jitter).
    pub stdev: Option<f64>,
    /// Failed share of the window, 0.0 to 100.0.
    pub packet_loss: f64,
    /// Total samples in the window, failures included.
    pub samples: usize,
}

/// Aggregate view across the whole active list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub online: usize,
    pub offline: usize,
    pub avg_ping: f64,
}

/// Bounded per-target sample history with O(1) latest lookup.
///
/// Entries are created lazily on first record and keyed by target string,
/// so history survives active-list changes.
#[derive(Debug, Default)]
pub struct HistoryBook {
    entries: HashMap<String, VecDeque<Sample>>,
}

impl HistoryBook {
    /// Append a sample, evicting the oldest past the window bound.
    pub fn record(&mut self, target: &str, sample: Sample) {
        let entry = self.entries.entry(target.to_string()).or_default();
        entry.push_back(sample);
        if entry.len() > HISTORY_WINDOW {
            entry.pop_front();
        }
    }

    /// Most recent sample for a target, if it was ever probed.
    pub fn latest(&self, target: &str) -> Option<Sample> {
        self.entries.get(target).and_then(|h| h.back().copied())
    }

    /// Statistics over the target's window, recomputed on every call.
    pub fn stats(&self, target: &str) -> Option<TargetStats> {
        let history = self.entries.get(target)?;
        if history.is_empty() {
            return None;
        }
        Some(compute_stats(history))
    }

    /// Aggregate across the given active list. A target repeated in the
    /// list counts once; targets never probed count as offline.
    pub fn overall(&self, targets: &[String]) -> OverallStats {
        let mut seen = HashSet::new();
        let mut online = 0;
        let mut offline = 0;
        let mut sum = 0.0;

        for target in targets {
            if !seen.insert(target.as_str()) {
                continue;
            }
            match self.latest(target) {
                Some(sample) if is_success(sample) => {
                    online += 1;
                    sum += sample as f64;
                }
                _ => offline += 1,
            }
        }

        let avg_ping = if online > 0 { sum / online as f64 } else { 0.0 };

        OverallStats {
            online,
            offline,
            avg_ping,
        }
    }

    /// Drop all history and latest results.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn compute_stats(history: &VecDeque<Sample>) -> TargetStats {
    let total = history.len();
    let ok: Vec<Sample> = history.iter().copied().filter(|s| is_success(*s)).collect();
    let failed = total - ok.len();
    let packet_loss = failed as f64 / total as f64 * 100.0;

    if ok.is_empty() {
        return TargetStats {
            avg: None,
            min: None,
            max: None,
            stdev: None,
            packet_loss,
            samples: total,
        };
    }

    let avg = ok.iter().map(|s| *s as f64).sum::<f64>() / ok.len() as f64;
    let variance = ok
        .iter()
        .map(|s| {
            let d = *s as f64 - avg;
            d * d
        })
        .sum::<f64>()
        / ok.len() as f64;

    TargetStats {
        avg: Some(avg),
        min: ok.iter().copied().min(),
        max: ok.iter().copied().max(),
        stdev: Some(variance.sqrt()),
        packet_loss,
        samples: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_stays_bounded() {
        let mut book = HistoryBook::default();
        for i in 0..150 {
            book.record("a.com", i);
        }

        let stats = book.stats("a.com").unwrap();
        assert_eq!(stats.samples, HISTORY_WINDOW);
        // Oldest entries are gone: the window is 50..=149.
        assert_eq!(stats.min, Some(50));
        assert_eq!(book.latest("a.com"), Some(149));
    }

    #[test]
    fn test_eviction_drops_exactly_the_oldest() {
        let mut book = HistoryBook::default();
        for i in 0..100 {
            book.record("a.com", 10 + i);
        }
        assert_eq!(book.stats("a.com").unwrap().min, Some(10));

        book.record("a.com", 500);
        let stats = book.stats("a.com").unwrap();
        assert_eq!(stats.samples, 100);
        assert_eq!(stats.min, Some(11));
        assert_eq!(stats.max, Some(500));
    }

    #[test]
    fn test_mixed_window_stats() {
        let mut book = HistoryBook::default();
        for sample in [50, 60, -1, 40] {
            book.record("a.com", sample);
        }

        let stats = book.stats("a.com").unwrap();
        assert_eq!(stats.avg, Some(50.0));
        assert_eq!(stats.min, Some(40));
        assert_eq!(stats.max, Some(60));
        assert_eq!(stats.packet_loss, 25.0);
        assert_eq!(stats.samples, 4);
        let expected_stdev = (200.0f64 / 3.0).sqrt();
        assert!((stats.stdev.unwrap() - expected_stdev).abs() < 1e-9);
    }

    #[test]
    fn test_stats_recomputed_not_cached() {
        let mut book = HistoryBook::default();
        book.record("a.com", 100);
        let first = book.stats("a.com").unwrap();
        let second = book.stats("a.com").unwrap();
        assert_eq!(first, second);

        book.record("a.com", 200);
        let third = book.stats("a.com").unwrap();
        assert_eq!(third.avg, Some(150.0));
        assert_eq!(third.samples, 2);
    }

    #[test]
    fn test_zero_latency_counts_as_success() {
        let mut book = HistoryBook::default();
        book.record("a.com", 0);

        let stats = book.stats("a.com").unwrap();
        assert_eq!(stats.packet_loss, 0.0);
        assert_eq!(stats.avg, Some(0.0));
        assert_eq!(stats.min, Some(0));
    }

    #[test]
    fn test_all_failed_window_keeps_loss() {
        let mut book = HistoryBook::default();
        book.record("a.com", -1);
        book.record("a.com", -1);

        let stats = book.stats("a.com").unwrap();
        assert_eq!(stats.avg, None);
        assert_eq!(stats.min, None);
        assert_eq!(stats.max, None);
        assert_eq!(stats.stdev, None);
        assert_eq!(stats.packet_loss, 100.0);
        assert_eq!(stats.samples, 2);
    }

    #[test]
    fn test_stats_absent_for_unknown_target() {
        let book = HistoryBook::default();
        assert!(book.stats("a.com").is_none());
        assert!(book.latest("a.com").is_none());
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut book = HistoryBook::default();
        book.record("a.com", 20);
        book.clear();
        assert!(book.stats("a.com").is_none());
        assert!(book.latest("a.com").is_none());
    }

    #[test]
    fn test_overall_counts_unprobed_as_offline() {
        let mut book = HistoryBook::default();
        book.record("a.com", 20);
        book.record("b.com", -1);

        let targets = vec![
            "a.com".to_string(),
            "b.com".to_string(),
            "c.com".to_string(),
        ];
        let overall = book.overall(&targets);
        assert_eq!(overall.online, 1);
        assert_eq!(overall.offline, 2);
        assert_eq!(overall.avg_ping, 20.0);
    }

    #[test]
    fn test_overall_counts_repeated_targets_once() {
        let mut book = HistoryBook::default();
        book.record("dup.example", 40);

        let targets = vec![
            "dup.example".to_string(),
            "dup.example".to_string(),
            "new.example".to_string(),
        ];
        let overall = book.overall(&targets);
        assert_eq!(overall.online, 1);
        assert_eq!(overall.offline, 1);
        assert_eq!(overall.avg_ping, 40.0);
    }

    #[test]
    fn test_overall_avg_zero_when_nothing_online() {
        let book = HistoryBook::default();
        let overall = book.overall(&["a.com".to_string()]);
        assert_eq!(overall.online, 0);
        assert_eq!(overall.offline, 1);
        assert_eq!(overall.avg_ping, 0.0);
    }
}
