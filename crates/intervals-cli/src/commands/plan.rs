use clap::Args;
use intervals_core::error::Result;
use intervals_core::format::{format_countdown, set_label};
use intervals_core::timer::Segment;
use intervals_core::Config;
use serde::Serialize;

use super::SessionArgs;

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    session: SessionArgs,
    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Plan {
    segments: Vec<Segment>,
    total_secs: u64,
}

pub fn run(args: PlanArgs) -> Result<()> {
    let config = Config::load_or_default();
    let timer = args.session.resolve(&config);
    timer.validate()?;

    let plan = Plan {
        segments: timer.plan(),
        total_secs: timer.total_secs(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    for segment in &plan.segments {
        println!(
            "{:<20} {:>6}",
            set_label(segment.phase, segment.sets_left),
            format_countdown(segment.duration_secs)
        );
    }
    let total = u32::try_from(plan.total_secs).unwrap_or(u32::MAX);
    println!("{:<20} {:>6}", "Total", format_countdown(total));
    Ok(())
}
