//! Cue policy: which countdown ticks get an audio/visual signal.
//!
//! Kept separate from playback so any sink (bell, sound file, flash) can
//! consume the same decision.

use serde::{Deserialize, Serialize};

use super::machine::Phase;

/// Seconds at or below which the countdown warns with a short cue.
pub const WARNING_SECS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueSignal {
    None,
    /// Countdown warning in the last seconds of a phase.
    Short,
    /// A phase boundary was crossed.
    Long,
    /// The last work interval ended.
    Finished,
}

impl CueSignal {
    pub fn is_audible(self) -> bool {
        self != CueSignal::None
    }
}

/// Map a tick to its cue.
///
/// `phase` and `sets_left` must be read *before* the tick is applied: the cue
/// marks the boundary being crossed, not the phase being entered.
pub fn cue_for(phase: Phase, secs_after_tick: u32, sets_left: u32) -> CueSignal {
    match secs_after_tick {
        0 if phase == Phase::Work && sets_left <= 1 => CueSignal::Finished,
        0 => CueSignal::Long,
        s if s <= WARNING_SECS => CueSignal::Short,
        _ => CueSignal::None,
    }
}
