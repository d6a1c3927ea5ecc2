use crate::config::ScoringConfig;
use crate::domain::ports::ConfidenceSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform placeholder confidence in `[low, high)`.
///
/// The VQC exposes no calibrated confidence, so each scored record gets a value drawn from
/// a fixed band instead. It is not a measurement.
pub struct UniformConfidence<R: Rng> {
    rng: R,
    low: f64,
    high: f64,
}

impl<R: Rng> UniformConfidence<R> {
    pub fn new(rng: R, low: f64, high: f64) -> Self {
        Self { rng, low, high }
    }
}

impl UniformConfidence<StdRng> {
    /// Seeded from `confidence_seed` when set, otherwise from OS entropy.
    pub fn from_config(config: &ScoringConfig) -> Self {
        let rng = match config.confidence_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(rng, config.confidence_low, config.confidence_high)
    }
}

impl<R: Rng> ConfidenceSource for UniformConfidence<R> {
    fn next_confidence(&mut self) -> f64 {
        if self.high > self.low {
            self.rng.random_range(self.low..self.high)
        } else {
            self.low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_stay_in_band() {
        let mut source = UniformConfidence::new(StdRng::seed_from_u64(7), 0.85, 0.98);
        for _ in 0..1_000 {
            let v = source.next_confidence();
            assert!((0.85..0.98).contains(&v), "{} outside band", v);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let config = ScoringConfig {
            confidence_seed: Some(42),
            ..ScoringConfig::default()
        };
        let mut a = UniformConfidence::from_config(&config);
        let mut b = UniformConfidence::from_config(&config);
        for _ in 0..10 {
            assert_eq!(a.next_confidence(), b.next_confidence());
        }
    }

    #[test]
    fn test_degenerate_band_returns_low() {
        let mut source = UniformConfidence::new(StdRng::seed_from_u64(1), 0.9, 0.9);
        assert_eq!(source.next_confidence(), 0.9);
    }
}
