//! Text helpers for countdown displays.

use crate::timer::Phase;

/// `"m:ss"` from a minute upwards, bare seconds below.
pub fn format_countdown(secs: u32) -> String {
    if secs >= 60 {
        format!("{}:{:02}", secs / 60, secs % 60)
    } else {
        secs.to_string()
    }
}

/// Header line such as `"Set #2 - WORK"`.
pub fn set_label(phase: Phase, sets_left: u32) -> String {
    format!("Set #{sets_left} - {phase}")
}
