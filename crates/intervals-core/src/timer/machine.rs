//! Interval state machine.
//!
//! The transition logic is a pure function over an explicit [`SessionState`]:
//! [`tick`] takes the current state and returns the next one together with the
//! events it produced. [`IntervalMachine`] wraps that function with the
//! session commands.
//!
//! ## State Transitions
//!
//! ```text
//! LeadIn -> Work -> Rest -> Work -> ... -> Work -> Finished
//! ```
//!
//! `sets_left` drops by one on every Rest -> Work transition. The last Work
//! (`sets_left <= 1`) goes straight to Finished. Phases configured with zero
//! seconds are passed through without a tick of their own.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::TimerConfiguration;
use super::cue::{cue_for, CueSignal};
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    LeadIn,
    Work,
    Rest,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::LeadIn => "GET READY",
            Phase::Work => "WORK",
            Phase::Rest => "REST",
            Phase::Finished => "FINISHED",
        };
        f.write_str(label)
    }
}

/// Mutable bookkeeping of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    pub seconds_remaining: u32,
    /// Work intervals not yet completed, including the current one.
    pub sets_left: u32,
    pub running: bool,
}

impl SessionState {
    /// Fresh, running state for `config`.
    pub fn initial(config: &TimerConfiguration) -> Self {
        settle(
            Self {
                phase: Phase::LeadIn,
                seconds_remaining: config.lead_in_secs,
                sets_left: config.sets_total,
                running: true,
            },
            config,
        )
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    fn finished() -> Self {
        Self {
            phase: Phase::Finished,
            seconds_remaining: 0,
            sets_left: 0,
            running: false,
        }
    }
}

/// Outcome of applying one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub events: Vec<Event>,
}

/// Apply one tick to `state`.
///
/// A paused or finished state is returned unchanged with no events.
pub fn tick(state: &SessionState, config: &TimerConfiguration) -> Transition {
    if !state.running || state.is_finished() {
        return Transition {
            state: *state,
            events: Vec::new(),
        };
    }

    let remaining = state.seconds_remaining.saturating_sub(1);
    let mut cue = cue_for(state.phase, remaining, state.sets_left);
    let mut events = Vec::with_capacity(2);

    let next = if remaining > 0 {
        events.push(Event::Tick {
            seconds_remaining: remaining,
        });
        SessionState {
            seconds_remaining: remaining,
            ..*state
        }
    } else {
        let next = settle(advance(state, config), config);
        if next.is_finished() {
            // Zero-length trailing phases can hide the final work boundary.
            cue = CueSignal::Finished;
        }
        events.push(Event::PhaseChanged {
            phase: next.phase,
            seconds_remaining: next.seconds_remaining,
            sets_left: next.sets_left,
        });
        next
    };

    if cue.is_audible() {
        events.push(Event::Cue { signal: cue });
    }

    Transition {
        state: next,
        events,
    }
}

/// The phase in `state` has run out; enter the following one.
fn advance(state: &SessionState, config: &TimerConfiguration) -> SessionState {
    match state.phase {
        Phase::LeadIn => SessionState {
            phase: Phase::Work,
            seconds_remaining: config.work_secs,
            ..*state
        },
        Phase::Work if state.sets_left > 1 => SessionState {
            phase: Phase::Rest,
            seconds_remaining: config.rest_secs,
            ..*state
        },
        Phase::Work | Phase::Finished => SessionState::finished(),
        Phase::Rest => SessionState {
            phase: Phase::Work,
            seconds_remaining: config.work_secs,
            sets_left: state.sets_left.saturating_sub(1),
            ..*state
        },
    }
}

/// Pass through phases that have no time on them.
fn settle(mut state: SessionState, config: &TimerConfiguration) -> SessionState {
    while !state.is_finished() && state.seconds_remaining == 0 {
        // With empty work and rest, every remaining set would collapse too.
        if state.phase != Phase::LeadIn && config.work_secs == 0 && config.rest_secs == 0 {
            return SessionState::finished();
        }
        state = advance(&state, config);
    }
    state
}

/// A running session: configuration plus the state it drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalMachine {
    config: TimerConfiguration,
    state: SessionState,
}

impl IntervalMachine {
    /// Validate `config` and begin a running session.
    pub fn start(config: TimerConfiguration) -> Result<(Self, Event), ValidationError> {
        config.validate()?;
        let machine = Self {
            state: SessionState::initial(&config),
            config,
        };
        let event = Event::SessionStarted {
            sets_total: config.sets_total,
            phase: machine.state.phase,
            seconds_remaining: machine.state.seconds_remaining,
            sets_left: machine.state.sets_left,
        };
        Ok((machine, event))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &TimerConfiguration {
        &self.config
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn tick(&mut self) -> Vec<Event> {
        let Transition { state, events } = tick(&self.state, &self.config);
        self.state = state;
        events
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        Some(Event::Paused {
            phase: self.state.phase,
            seconds_remaining: self.state.seconds_remaining,
            sets_left: self.state.sets_left,
        })
    }

    /// No-op when already running or finished.
    pub fn resume(&mut self) -> Option<Event> {
        if self.state.running || self.state.is_finished() {
            return None;
        }
        self.state.running = true;
        Some(Event::Resumed {
            phase: self.state.phase,
            seconds_remaining: self.state.seconds_remaining,
            sets_left: self.state.sets_left,
        })
    }

    /// Reset to a fresh session. On a validation failure the current
    /// session is left untouched.
    pub fn restart(&mut self, config: TimerConfiguration) -> Result<Event, ValidationError> {
        let (fresh, event) = Self::start(config)?;
        *self = fresh;
        Ok(event)
    }

    /// Stop and discard the session.
    pub fn quit(mut self) -> Event {
        self.state.running = false;
        Event::SessionQuit {
            phase: self.state.phase,
            seconds_remaining: self.state.seconds_remaining,
            sets_left: self.state.sets_left,
        }
    }
}
