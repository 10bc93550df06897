//! Display metadata: percentiles, confidence intervals, reliability
//! coefficients and learning-path match scores.
//!
//! None of these numbers come from a statistical model. The generator can
//! run deterministically (pure functions of the score), from a seeded
//! ChaCha8 stream, or from an entropy-seeded stream that gives a fresh
//! spread on every run.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::model::Reliability;

/// How display metadata is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum MetadataMode {
    /// No randomness; every figure is a function of its input score.
    #[default]
    Deterministic,
    /// Jittered from a reproducible ChaCha8 stream.
    Seeded { seed: u64 },
    /// Jittered from an entropy-seeded stream.
    Random,
}

/// Half-width of the deterministic confidence intervals.
const DETERMINISTIC_SPREAD: u8 = 7;

/// Produces display metadata according to a [`MetadataMode`].
#[derive(Debug, Clone)]
pub struct MetadataGenerator {
    /// `None` in deterministic mode.
    rng: Option<ChaCha8Rng>,
}

impl MetadataGenerator {
    pub fn new(mode: MetadataMode) -> Self {
        let rng = match mode {
            MetadataMode::Deterministic => None,
            MetadataMode::Seeded { seed } => Some(ChaCha8Rng::seed_from_u64(seed)),
            MetadataMode::Random => Some(ChaCha8Rng::from_entropy()),
        };
        Self { rng }
    }

    /// A draw from `[0, 1)`, or `None` in deterministic mode.
    fn unit(&mut self) -> Option<f64> {
        self.rng.as_mut().map(|rng| rng.gen::<f64>())
    }

    /// Percentile for an aggregated dimension value, capped at 99.
    pub fn percentile(&mut self, value: u8) -> u8 {
        let jitter = match self.unit() {
            Some(u) => u * 20.0,
            None => 10.0,
        };
        (value as f64 * 0.8 + jitter).round().min(99.0) as u8
    }

    /// Confidence interval around an aggregated dimension value.
    pub fn confidence_interval(&mut self, value: u8) -> [u8; 2] {
        let (low, high) = match (self.unit(), self.unit()) {
            (Some(a), Some(b)) => ((a * 15.0).round() as u8, (b * 15.0).round() as u8),
            _ => (DETERMINISTIC_SPREAD, DETERMINISTIC_SPREAD),
        };
        bracket(value, low, high)
    }

    /// Reliability block for a freshly completed section score.
    pub fn reliability(&mut self, score: u8) -> Reliability {
        let alpha = match self.unit() {
            Some(u) => 0.70 + u * 0.25,
            None => 0.70 + 0.25 * score as f64 / 100.0,
        };
        let (low, high) = match (self.unit(), self.unit()) {
            (Some(a), Some(b)) => ((a * 15.0).floor() as u8, (b * 15.0).floor() as u8),
            _ => (DETERMINISTIC_SPREAD, DETERMINISTIC_SPREAD),
        };
        Reliability {
            cronbach_alpha: (alpha * 100.0).round() / 100.0,
            confidence_interval: bracket(score, low, high),
        }
    }

    /// Strength factor in `[0, 1]` used to scale learning-path match scores.
    pub fn path_strength(&mut self, dominant_value: u8) -> f64 {
        match self.unit() {
            Some(u) => u,
            None => dominant_value.min(100) as f64 / 100.0,
        }
    }
}

impl Default for MetadataGenerator {
    fn default() -> Self {
        Self::new(MetadataMode::default())
    }
}

fn bracket(value: u8, below: u8, above: u8) -> [u8; 2] {
    [value.saturating_sub(below), value.saturating_add(above).min(100)]
}
