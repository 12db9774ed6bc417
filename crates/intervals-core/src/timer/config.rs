use serde::{Deserialize, Serialize};

use super::machine::Phase;
use crate::error::ValidationError;

/// Lead-in used when a configuration does not specify one.
pub const DEFAULT_LEAD_IN_SECS: u32 = 5;

fn default_lead_in() -> u32 {
    DEFAULT_LEAD_IN_SECS
}

/// Immutable input for one session: how many work/rest sets to run and how
/// long each phase lasts, in seconds.
///
/// A `lead_in_secs` of 0 skips the lead-in and starts directly in work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfiguration {
    pub sets_total: u32,
    pub work_secs: u32,
    pub rest_secs: u32,
    #[serde(default = "default_lead_in")]
    pub lead_in_secs: u32,
}

/// One contiguous phase of a planned session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub phase: Phase,
    pub duration_secs: u32,
    /// Work intervals not yet completed while this segment runs.
    pub sets_left: u32,
}

impl TimerConfiguration {
    /// Build a validated configuration with the default lead-in.
    pub fn new(sets_total: u32, work_secs: u32, rest_secs: u32) -> Result<Self, ValidationError> {
        let config = Self {
            sets_total,
            work_secs,
            rest_secs,
            lead_in_secs: DEFAULT_LEAD_IN_SECS,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_lead_in(mut self, lead_in_secs: u32) -> Self {
        self.lead_in_secs = lead_in_secs;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sets_total == 0 {
            return Err(ValidationError::NoSets);
        }
        Ok(())
    }

    /// Duration of a running phase. `Finished` has none.
    pub fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::LeadIn => self.lead_in_secs,
            Phase::Work => self.work_secs,
            Phase::Rest => self.rest_secs,
            Phase::Finished => 0,
        }
    }

    /// Seconds from start to finish, i.e. the number of ticks a session takes.
    ///
    /// Saturates instead of overflowing for absurd inputs.
    pub fn total_secs(&self) -> u64 {
        let sets = u64::from(self.sets_total);
        u64::from(self.lead_in_secs)
            .saturating_add(sets.saturating_mul(u64::from(self.work_secs)))
            .saturating_add(
                sets.saturating_sub(1)
                    .saturating_mul(u64::from(self.rest_secs)),
            )
    }

    /// Ordered timeline of the non-empty phases a session runs through.
    pub fn plan(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut push = |phase: Phase, sets_left: u32| {
            let duration_secs = self.duration_of(phase);
            if duration_secs > 0 {
                segments.push(Segment {
                    phase,
                    duration_secs,
                    sets_left,
                });
            }
        };

        push(Phase::LeadIn, self.sets_total);
        for sets_left in (1..=self.sets_total).rev() {
            push(Phase::Work, sets_left);
            if sets_left > 1 {
                push(Phase::Rest, sets_left);
            }
        }
        segments
    }
}

impl Default for TimerConfiguration {
    fn default() -> Self {
        Self {
            sets_total: 1,
            work_secs: 5,
            rest_secs: 5,
            lead_in_secs: DEFAULT_LEAD_IN_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_sets() {
        assert_eq!(TimerConfiguration::new(0, 30, 10), Err(ValidationError::NoSets));
    }

    #[test]
    fn new_uses_default_lead_in() {
        let config = TimerConfiguration::new(3, 30, 10).unwrap();
        assert_eq!(config.lead_in_secs, DEFAULT_LEAD_IN_SECS);
        assert_eq!(config.with_lead_in(0).lead_in_secs, 0);
    }

    #[test]
    fn missing_lead_in_deserializes_to_default() {
        let config: TimerConfiguration =
            serde_json::from_str(r#"{"sets_total":2,"work_secs":20,"rest_secs":10}"#).unwrap();
        assert_eq!(config.lead_in_secs, 5);
    }

    #[test]
    fn total_counts_rest_between_sets_only() {
        let config = TimerConfiguration::new(3, 20, 10).unwrap();
        assert_eq!(config.total_secs(), 5 + 3 * 20 + 2 * 10);
    }

    #[test]
    fn plan_orders_phases_and_skips_empty_ones() {
        let config = TimerConfiguration::new(2, 20, 10).unwrap().with_lead_in(0);
        let phases: Vec<(Phase, u32)> = config
            .plan()
            .iter()
            .map(|s| (s.phase, s.sets_left))
            .collect();
        assert_eq!(
            phases,
            vec![(Phase::Work, 2), (Phase::Rest, 2), (Phase::Work, 1)]
        );
    }

    #[test]
    fn plan_durations_sum_to_total() {
        let config = TimerConfiguration::new(4, 45, 15).unwrap();
        let sum: u64 = config.plan().iter().map(|s| u64::from(s.duration_secs)).sum();
        assert_eq!(sum, config.total_secs());
    }
}
