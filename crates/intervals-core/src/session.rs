//! Session controller.
//!
//! Binds a [`TimerConfiguration`] to an [`IntervalMachine`] and a [`Ticker`],
//! and relays every event to the injected display and audio collaborators.
//! There is at most one session at a time; starting, restarting or quitting
//! disarms the ticker before the old session is replaced.
//!
//! ## Usage
//!
//! ```ignore
//! let mut controller = SessionController::new(display, audio, DEFAULT_PERIOD);
//! controller.start(config)?;
//! while controller.is_running() {
//!     let token = controller.next_tick().await;
//!     controller.on_tick(token);
//! }
//! ```

use std::time::Duration;

use tracing::{debug, info};

use crate::error::ValidationError;
use crate::events::Event;
use crate::ticker::{TickToken, Ticker};
use crate::timer::{CueSignal, IntervalMachine, SessionState, TimerConfiguration};

/// Receives every event a session emits.
pub trait EventDisplay {
    fn show(&mut self, event: &Event);
}

/// Plays cue sounds. Only audible cues are delivered.
pub trait AudioPlayer {
    fn play(&mut self, cue: CueSignal);
}

impl<T: EventDisplay + ?Sized> EventDisplay for Box<T> {
    fn show(&mut self, event: &Event) {
        (**self).show(event);
    }
}

impl<T: AudioPlayer + ?Sized> AudioPlayer for Box<T> {
    fn play(&mut self, cue: CueSignal) {
        (**self).play(cue);
    }
}

/// Audio sink that drops every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl AudioPlayer for Muted {
    fn play(&mut self, _cue: CueSignal) {}
}

pub struct SessionController<D, A> {
    display: D,
    audio: A,
    ticker: Ticker,
    session: Option<IntervalMachine>,
}

impl<D: EventDisplay, A: AudioPlayer> SessionController<D, A> {
    pub fn new(display: D, audio: A, period: Duration) -> Self {
        Self {
            display,
            audio,
            ticker: Ticker::new(period),
            session: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref().map(IntervalMachine::state)
    }

    pub fn config(&self) -> Option<&TimerConfiguration> {
        self.session.as_ref().map(IntervalMachine::config)
    }

    pub fn is_running(&self) -> bool {
        self.session().is_some_and(|s| s.running)
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session, replacing any current one.
    ///
    /// An invalid configuration is rejected before anything changes.
    pub fn start(&mut self, config: TimerConfiguration) -> Result<(), ValidationError> {
        let (machine, event) = IntervalMachine::start(config)?;
        self.ticker.disarm();
        let running = machine.state().running;
        self.session = Some(machine);
        info!(
            sets = config.sets_total,
            work_secs = config.work_secs,
            rest_secs = config.rest_secs,
            lead_in_secs = config.lead_in_secs,
            "session started"
        );
        if running {
            self.ticker.arm();
        }
        self.emit(event);
        Ok(())
    }

    pub fn restart(&mut self, config: TimerConfiguration) -> Result<(), ValidationError> {
        self.start(config)
    }

    pub fn pause(&mut self) {
        let Some(event) = self.session.as_mut().and_then(IntervalMachine::pause) else {
            return;
        };
        self.ticker.disarm();
        debug!("session paused");
        self.emit(event);
    }

    pub fn resume(&mut self) {
        let Some(event) = self.session.as_mut().and_then(IntervalMachine::resume) else {
            return;
        };
        self.ticker.arm();
        debug!("session resumed");
        self.emit(event);
    }

    /// Stop and discard the session. No tick or cue from it is emitted
    /// afterwards.
    pub fn quit(&mut self) {
        self.ticker.disarm();
        if let Some(machine) = self.session.take() {
            info!("session quit");
            self.emit(machine.quit());
        }
    }

    // ── Clock ────────────────────────────────────────────────────────

    /// Wait for the ticker. Pending forever while no session is running.
    pub async fn next_tick(&mut self) -> TickToken {
        self.ticker.tick().await
    }

    /// Apply a pulse. Tokens from a superseded arming are ignored.
    pub fn on_tick(&mut self, token: TickToken) {
        if !self.ticker.accepts(token) {
            debug!("ignoring stale tick");
            return;
        }
        let Some(machine) = self.session.as_mut() else {
            return;
        };

        let events = machine.tick();
        if machine.state().is_finished() {
            self.ticker.disarm();
            info!("session finished");
        }
        for event in events {
            self.emit(event);
        }
    }

    fn emit(&mut self, event: Event) {
        if let Some(cue) = event.cue() {
            self.audio.play(cue);
        }
        self.display.show(&event);
    }
}
