mod config;
mod cue;
mod machine;

pub use config::{Segment, TimerConfiguration, DEFAULT_LEAD_IN_SECS};
pub use cue::{cue_for, CueSignal, WARNING_SECS};
pub use machine::{tick, IntervalMachine, Phase, SessionState, Transition};
