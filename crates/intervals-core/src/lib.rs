//! # Intervals Core Library
//!
//! Core logic for an interval-training countdown timer: a number of work/rest
//! sets, optionally preceded by a lead-in, counted down one second at a time.
//! The CLI binary is a thin shell over this library.
//!
//! ## Architecture
//!
//! - **Timer**: configuration, the pure tick transition and the cue policy
//! - **Ticker**: a single-threaded periodic pulse built on `tokio::time`
//! - **Session**: controller wiring the machine and ticker to display and
//!   audio collaborators
//! - **Storage**: TOML-based settings
//!
//! ## Key Components
//!
//! - [`IntervalMachine`]: Session state machine
//! - [`SessionController`]: Command surface and event relay
//! - [`cue_for`]: Cue policy
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod format;
pub mod session;
pub mod storage;
pub mod ticker;
pub mod timer;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{Event, EventRecord};
pub use session::{AudioPlayer, EventDisplay, Muted, SessionController};
pub use storage::Config;
pub use ticker::{TickToken, Ticker, DEFAULT_PERIOD};
pub use timer::{cue_for, CueSignal, IntervalMachine, Phase, SessionState, TimerConfiguration};
