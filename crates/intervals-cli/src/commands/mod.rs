pub mod config;
pub mod plan;
pub mod run;

use clap::Args;
use intervals_core::{Config, TimerConfiguration};

/// Session shape flags shared by `run` and `plan`. Unset flags fall back to
/// the `[session]` section of the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct SessionArgs {
    /// Number of work/rest sets
    #[arg(long)]
    pub sets: Option<u32>,
    /// Work duration in seconds
    #[arg(long)]
    pub work: Option<u32>,
    /// Rest duration in seconds
    #[arg(long)]
    pub rest: Option<u32>,
    /// Lead-in before the first set in seconds (0 skips it)
    #[arg(long)]
    pub lead_in: Option<u32>,
}

impl SessionArgs {
    pub fn resolve(&self, config: &Config) -> TimerConfiguration {
        let base = config.timer_configuration();
        TimerConfiguration {
            sets_total: self.sets.unwrap_or(base.sets_total),
            work_secs: self.work.unwrap_or(base.work_secs),
            rest_secs: self.rest.unwrap_or(base.rest_secs),
            lead_in_secs: self.lead_in.unwrap_or(base.lead_in_secs),
        }
    }
}
