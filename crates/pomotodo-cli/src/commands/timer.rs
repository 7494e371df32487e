use std::io::Write;

use clap::Subcommand;
use pomotodo_core::{format_time, Config, CycleSettingsPatch, Event, FocusEngine};

use super::open_store;
use crate::alerts::TerminalAlerts;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the countdown in the foreground until phases complete
    Run {
        /// Number of phases to run back to back
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        phases: u32,
    },
    /// Print current timer state as JSON
    Status,
    /// Refill the current phase
    Reset,
    /// Jump to the next phase
    Skip,
    /// Change cycle durations (seconds)
    Configure {
        /// Work phase length
        #[arg(long)]
        work: Option<u32>,
        /// Short break length
        #[arg(long = "break")]
        short_break: Option<u32>,
        /// Long break length
        #[arg(long)]
        long_break: Option<u32>,
        /// Work sessions between long breaks
        #[arg(long)]
        sessions: Option<u32>,
    },
}

fn render(event: &Event) {
    if let Event::TimerStarted {
        mode,
        remaining_secs,
        ..
    }
    | Event::TimerTicked {
        mode,
        remaining_secs,
        ..
    } = event
    {
        let mut out = std::io::stdout();
        let _ = write!(out, "\r{} {}  ", mode.label(), format_time(*remaining_secs));
        let _ = out.flush();
    }
}

fn run_foreground(
    engine: &mut FocusEngine,
    phases: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    engine.subscribe(render);
    engine.request_notification_permission();

    let mut completed = 0;
    while completed < phases {
        if !engine.is_running() {
            engine.start();
        }
        let Some(wait) = engine.next_tick_in() else {
            break;
        };
        std::thread::sleep(wait);
        for event in engine.poll() {
            if let Event::TimerCompleted { .. } = event {
                completed += 1;
                tracing::info!(completed, phases, "phase finished");
            }
        }
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}

pub fn run(action: TimerAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let mut engine = FocusEngine::new(store)
        .with_alerts(TerminalAlerts::new(config))
        .with_tone(config.tone());

    match action {
        TimerAction::Run { phases } => run_foreground(&mut engine, phases)?,
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Reset => {
            let event = engine.reset();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Skip => {
            let event = engine.skip();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Configure {
            work,
            short_break,
            long_break,
            sessions,
        } => {
            let patch = CycleSettingsPatch {
                work_duration: work,
                break_duration: short_break,
                long_break_duration: long_break,
                sessions_before_long_break: sessions,
            };
            if patch.is_empty() {
                return Err("nothing to configure: pass --work, --break, --long-break or --sessions".into());
            }
            let event = engine.configure(patch);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }
    Ok(())
}
