//! Temperature → duty-cycle step table.
//!
//! A staircase function: the duty cycle of the highest threshold that the
//! temperature strictly exceeds, or 0.0 when it exceeds none.  A reading
//! exactly equal to a threshold does *not* select that step.
//!
//! There is no hysteresis.  Readings that hover around a threshold flip
//! between adjacent steps on consecutive polls.

use heapless::Vec;

use crate::app::ports::ConfigError;
use crate::config::{REFERENCE_DUTIES, REFERENCE_TEMPS_C};

/// Maximum number of steps a table can hold.
pub const MAX_STEPS: usize = 16;

/// One stair of the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub threshold_c: f32,
    pub duty: f32,
}

/// Immutable, validated step table.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTable {
    steps: Vec<Step, MAX_STEPS>,
}

impl StepTable {
    /// Pair `thresholds` and `duties` by index.
    ///
    /// Rejects mismatched lengths, empty or oversized tables, thresholds that
    /// are not strictly increasing, and duties outside 0.0–1.0.
    pub fn new(thresholds: &[f32], duties: &[f32]) -> Result<Self, ConfigError> {
        if thresholds.len() != duties.len() {
            return Err(ConfigError::ValidationFailed(
                "step_temps_c and step_duties must have equal length",
            ));
        }
        if thresholds.is_empty() {
            return Err(ConfigError::ValidationFailed("step table must not be empty"));
        }

        let mut steps = Vec::new();
        let mut prev: Option<f32> = None;
        for (&threshold_c, &duty) in thresholds.iter().zip(duties) {
            if !threshold_c.is_finite() {
                return Err(ConfigError::ValidationFailed(
                    "step thresholds must be finite",
                ));
            }
            if prev.is_some_and(|p| threshold_c <= p) {
                return Err(ConfigError::ValidationFailed(
                    "step thresholds must be strictly increasing",
                ));
            }
            if !(0.0..=1.0).contains(&duty) {
                return Err(ConfigError::ValidationFailed(
                    "step duties must be 0.0–1.0",
                ));
            }
            steps
                .push(Step { threshold_c, duty })
                .map_err(|_| ConfigError::ValidationFailed("step table exceeds 16 entries"))?;
            prev = Some(threshold_c);
        }

        Ok(Self { steps })
    }

    /// The compiled-in table: 40/45/55/60/65/68 °C → 0.5/0.6/0.7/0.8/0.9/1.0.
    pub fn reference() -> Self {
        Self {
            steps: REFERENCE_TEMPS_C
                .iter()
                .zip(REFERENCE_DUTIES.iter())
                .map(|(&threshold_c, &duty)| Step { threshold_c, duty })
                .collect(),
        }
    }

    /// Map a temperature to a duty cycle.
    ///
    /// Scans in ascending order and keeps the last step whose threshold is
    /// strictly below `temp_c`.  A NaN reading matches nothing and yields 0.0.
    pub fn compute_speed(&self, temp_c: f32) -> f32 {
        let mut speed = 0.0;
        for step in self.steps.iter() {
            if temp_c > step.threshold_c {
                speed = step.duty;
            }
        }
        speed
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
