//! Terminal-side collaborators for a session: text or JSON display, and a
//! bell for cues.

use std::io::Write;

use intervals_core::format::{format_countdown, set_label};
use intervals_core::{AudioPlayer, CueSignal, Event, EventDisplay, Phase};

/// Human-readable countdown, one line per event.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl EventDisplay for TerminalDisplay {
    fn show(&mut self, event: &Event) {
        match *event {
            Event::SessionStarted {
                phase: Phase::Finished,
                ..
            }
            | Event::PhaseChanged {
                phase: Phase::Finished,
                ..
            } => println!("Finished! [s] restart  [q] quit"),
            Event::SessionStarted {
                phase,
                seconds_remaining,
                sets_left,
                ..
            }
            | Event::PhaseChanged {
                phase,
                seconds_remaining,
                sets_left,
            } => println!(
                "{}  {}",
                set_label(phase, sets_left),
                format_countdown(seconds_remaining)
            ),
            Event::Tick { seconds_remaining } => println!("{}", format_countdown(seconds_remaining)),
            Event::Paused { .. } => println!("Paused. [r] resume  [q] quit"),
            Event::Resumed {
                phase,
                seconds_remaining,
                sets_left,
            } => println!(
                "{}  {}",
                set_label(phase, sets_left),
                format_countdown(seconds_remaining)
            ),
            Event::SessionQuit { .. } => println!("Quit."),
            Event::Cue { .. } => {}
        }
    }
}

/// One timestamped JSON object per line.
#[derive(Debug, Default)]
pub struct JsonLines;

impl EventDisplay for JsonLines {
    fn show(&mut self, event: &Event) {
        match serde_json::to_string(&event.clone().stamped()) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!("cannot serialize event: {e}"),
        }
    }
}

/// Rings the terminal bell on stderr: once for a warning, twice for a phase
/// change, three times at the end.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    fn rings(cue: CueSignal) -> usize {
        match cue {
            CueSignal::None => 0,
            CueSignal::Short => 1,
            CueSignal::Long => 2,
            CueSignal::Finished => 3,
        }
    }
}

impl AudioPlayer for TerminalBell {
    fn play(&mut self, cue: CueSignal) {
        let mut stderr = std::io::stderr().lock();
        let bells = "\x07".repeat(Self::rings(cue));
        if let Err(e) = stderr.write_all(bells.as_bytes()).and_then(|_| stderr.flush()) {
            tracing::debug!("bell failed: {e}");
        }
    }
}
