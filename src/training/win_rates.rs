use serde::{Deserialize, Serialize};

/// Win rate measured by one evaluation batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinRateSample {
    /// Training-game index after which the batch ran.
    pub game: usize,
    pub win_rate: f64,
}

/// Evaluated win rates keyed by training-game index.
///
/// Samples are kept in insertion order, which is also strictly increasing
/// game order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WinRateRecord {
    samples: Vec<WinRateSample>,
}

impl WinRateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the win rate measured after training game `game`.
    pub fn record(&mut self, game: usize, win_rate: f64) {
        debug_assert!(
            self.samples.last().map_or(true, |s| s.game < game),
            "win rates must be recorded in increasing game order"
        );
        debug_assert!((0.0..=1.0).contains(&win_rate));
        self.samples.push(WinRateSample { game, win_rate });
    }

    pub fn get(&self, game: usize) -> Option<f64> {
        self.samples
            .binary_search_by_key(&game, |s| s.game)
            .ok()
            .map(|i| self.samples[i].win_rate)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WinRateSample> {
        self.samples.iter()
    }

    pub fn games(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.game).collect()
    }

    pub fn last(&self) -> Option<WinRateSample> {
        self.samples.last().copied()
    }

    /// Sample with the highest win rate; the earliest one on ties.
    pub fn best(&self) -> Option<WinRateSample> {
        self.samples
            .iter()
            .copied()
            .fold(None, |best: Option<WinRateSample>, s| match best {
                Some(b) if b.win_rate >= s.win_rate => Some(b),
                _ => Some(s),
            })
    }

    /// Chart points as (game, win rate).
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.game as f64, s.win_rate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_lookup() {
        let mut record = WinRateRecord::new();
        record.record(801, 0.25);
        record.record(802, 0.5);

        assert_eq!(record.len(), 2);
        assert_eq!(record.get(802), Some(0.5));
        assert_eq!(record.get(800), None);
        assert_eq!(record.games(), vec![801, 802]);
    }

    #[test]
    fn test_best_prefers_earliest_on_ties() {
        let mut record = WinRateRecord::new();
        record.record(1, 0.4);
        record.record(2, 0.6);
        record.record(3, 0.6);
        assert_eq!(record.best().map(|s| s.game), Some(2));
        assert_eq!(record.last().map(|s| s.game), Some(3));
    }

    #[test]
    fn test_empty_record() {
        let record = WinRateRecord::new();
        assert!(record.is_empty());
        assert!(record.best().is_none());
        assert!(record.points().is_empty());
    }

    #[test]
    fn test_serializes_as_sample_list() {
        let mut record = WinRateRecord::new();
        record.record(5, 0.2);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"[{"game":5,"win_rate":0.2}]"#);
    }

    #[test]
    #[should_panic(expected = "increasing game order")]
    #[cfg(debug_assertions)]
    fn test_out_of_order_record_panics_in_debug() {
        let mut record = WinRateRecord::new();
        record.record(5, 0.2);
        record.record(5, 0.3);
    }
}
