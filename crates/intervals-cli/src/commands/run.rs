use std::time::Duration;

use clap::Args;
use intervals_core::error::Result;
use intervals_core::{
    AudioPlayer, Config, EventDisplay, Muted, SessionController, TimerConfiguration,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use super::SessionArgs;
use crate::output::{JsonLines, TerminalBell, TerminalDisplay};

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    session: SessionArgs,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
    /// Do not ring the terminal bell on cues
    #[arg(long)]
    mute: bool,
    /// Milliseconds per tick, overriding `ticker.period_ms`
    #[arg(long, hide = true)]
    tick_ms: Option<u64>,
}

/// Keyboard commands read from stdin, one per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionCommand {
    Toggle,
    Pause,
    Resume,
    Restart,
    Quit,
}

impl SessionCommand {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" => Some(Self::Toggle),
            "p" | "pause" | "stop" => Some(Self::Pause),
            "r" | "resume" => Some(Self::Resume),
            "s" | "restart" => Some(Self::Restart),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub fn run(args: RunArgs) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let timer = args.session.resolve(&config);
    let period = args
        .tick_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.tick_period());

    let display: Box<dyn EventDisplay> = if args.json {
        Box::new(JsonLines)
    } else {
        Box::new(TerminalDisplay)
    };
    let audio: Box<dyn AudioPlayer> = if args.mute || !config.audio.enabled {
        Box::new(Muted)
    } else {
        Box::new(TerminalBell)
    };
    let mut controller = SessionController::new(display, audio, period);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(&mut controller, timer))?;
    Ok(())
}

/// Run one session until it is quit, or until it stops with stdin closed.
async fn drive<D: EventDisplay, A: AudioPlayer>(
    controller: &mut SessionController<D, A>,
    timer: TimerConfiguration,
) -> Result<()> {
    controller.start(timer)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    while let Some(state) = controller.session().copied() {
        if !stdin_open && !state.running {
            if !state.is_finished() {
                controller.quit();
            }
            break;
        }

        tokio::select! {
            token = controller.next_tick() => controller.on_tick(token),
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => match SessionCommand::parse(&line) {
                    Some(command) => apply(controller, command, timer)?,
                    None => warn!("unknown command: {}", line.trim()),
                },
                None => stdin_open = false,
            },
        }
    }
    Ok(())
}

fn apply<D: EventDisplay, A: AudioPlayer>(
    controller: &mut SessionController<D, A>,
    command: SessionCommand,
    timer: TimerConfiguration,
) -> Result<()> {
    match command {
        SessionCommand::Toggle if controller.is_running() => controller.pause(),
        SessionCommand::Toggle | SessionCommand::Resume => controller.resume(),
        SessionCommand::Pause => controller.pause(),
        SessionCommand::Restart => controller.restart(timer)?,
        SessionCommand::Quit => controller.quit(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use intervals_core::{Event, Phase};

    #[test]
    fn parses_short_and_long_commands() {
        assert_eq!(SessionCommand::parse("p"), Some(SessionCommand::Pause));
        assert_eq!(SessionCommand::parse(" Resume \n"), Some(SessionCommand::Resume));
        assert_eq!(SessionCommand::parse("s"), Some(SessionCommand::Restart));
        assert_eq!(SessionCommand::parse("quit"), Some(SessionCommand::Quit));
        assert_eq!(SessionCommand::parse(""), Some(SessionCommand::Toggle));
        assert_eq!(SessionCommand::parse("jump"), None);
    }

    #[derive(Default)]
    struct Recorder(Vec<Event>);

    impl EventDisplay for Recorder {
        fn show(&mut self, event: &Event) {
            self.0.push(event.clone());
        }
    }

    #[test]
    fn toggle_pauses_then_resumes() {
        let timer = TimerConfiguration::new(2, 10, 5).unwrap();
        let mut controller =
            SessionController::new(Recorder::default(), Muted, Duration::from_secs(1));
        controller.start(timer).unwrap();

        apply(&mut controller, SessionCommand::Toggle, timer).unwrap();
        assert!(!controller.is_running());
        apply(&mut controller, SessionCommand::Toggle, timer).unwrap();
        assert!(controller.is_running());

        apply(&mut controller, SessionCommand::Quit, timer).unwrap();
        assert!(controller.session().is_none());
        assert!(matches!(
            controller.display().0.last(),
            Some(Event::SessionQuit {
                phase: Phase::LeadIn,
                ..
            })
        ));
    }
}
