use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{CueSignal, Phase};

/// Everything a session reports to its display and audio collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        sets_total: u32,
        phase: Phase,
        seconds_remaining: u32,
        sets_left: u32,
    },
    /// Countdown moved within the current phase.
    Tick { seconds_remaining: u32 },
    /// The countdown crossed a phase boundary; values are for the new phase.
    PhaseChanged {
        phase: Phase,
        seconds_remaining: u32,
        sets_left: u32,
    },
    Cue { signal: CueSignal },
    Paused {
        phase: Phase,
        seconds_remaining: u32,
        sets_left: u32,
    },
    Resumed {
        phase: Phase,
        seconds_remaining: u32,
        sets_left: u32,
    },
    SessionQuit {
        phase: Phase,
        seconds_remaining: u32,
        sets_left: u32,
    },
}

/// An event with the wall-clock time it was emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(flatten)]
    pub event: Event,
    pub at: DateTime<Utc>,
}

impl Event {
    pub fn stamped(self) -> EventRecord {
        EventRecord {
            event: self,
            at: Utc::now(),
        }
    }

    pub fn cue(&self) -> Option<CueSignal> {
        match self {
            Event::Cue { signal } => Some(*signal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Event::PhaseChanged {
            phase: Phase::Rest,
            seconds_remaining: 10,
            sets_left: 2,
        })
        .unwrap();
        assert_eq!(json["type"], "PhaseChanged");
        assert_eq!(json["phase"], "rest");
        assert_eq!(json["sets_left"], 2);
    }

    #[test]
    fn record_flattens_event_fields() {
        let record = Event::Cue {
            signal: CueSignal::Long,
        }
        .stamped();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Cue");
        assert_eq!(json["signal"], "long");
        assert!(json["at"].is_string());
    }

    #[test]
    fn cue_accessor() {
        assert_eq!(
            Event::Cue {
                signal: CueSignal::Short
            }
            .cue(),
            Some(CueSignal::Short)
        );
        assert_eq!(Event::Tick { seconds_remaining: 3 }.cue(), None);
    }
}
