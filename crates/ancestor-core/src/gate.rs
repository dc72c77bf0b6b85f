//! The acceptance gate.

use crate::traits::AcceptanceGate;

/// The default acceptance threshold.
pub const DEFAULT_THRESHOLD: f64 = 60.0;

/// Return true iff `score >= threshold`.
pub fn accept(score: f64, threshold: f64) -> bool {
    score >= threshold
}

/// An `AcceptanceGate` with a fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdGate {
    threshold: f64,
}

impl ThresholdGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for ThresholdGate {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl AcceptanceGate for ThresholdGate {
    fn threshold(&self) -> f64 {
        self.threshold
    }
}
