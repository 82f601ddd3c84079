use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use focusboard_core::error::Result;
use focusboard_core::timer::{format_clock, Mode, TickId, TickSource, TimerEngine, TimerView, ToggleLabel};
use focusboard_core::{Config, Event};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run an interactive countdown in this terminal
    Run {
        /// Mode to start in: pomodoro, short or long (default: timer.initial_mode)
        #[arg(long)]
        mode: Option<Mode>,
        /// Start counting immediately
        #[arg(long)]
        start: bool,
    },
    /// Print modes and their durations as JSON
    Modes,
}

/// One-second tick source backed by a tokio interval task.
pub struct TokioTicks {
    tx: mpsc::UnboundedSender<TickId>,
}

impl TokioTicks {
    pub fn new(tx: mpsc::UnboundedSender<TickId>) -> Self {
        Self { tx }
    }
}

impl TickSource for TokioTicks {
    type Handle = JoinHandle<()>;

    fn start(&mut self, id: TickId) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(id).is_err() {
                    break;
                }
            }
        })
    }

    fn cancel(&mut self, handle: JoinHandle<()>) {
        handle.abort();
    }
}

/// Single status line redrawn in place.
pub struct TerminalTimerView {
    clock: String,
    label: ToggleLabel,
    mode: Mode,
    bell: bool,
}

impl TerminalTimerView {
    pub fn new(bell: bool) -> Self {
        Self {
            clock: String::new(),
            label: ToggleLabel::Start,
            mode: Mode::default(),
            bell,
        }
    }

    fn redraw(&self) {
        let mut out = std::io::stdout().lock();
        let _ = write!(
            out,
            "\r{:<12} {}  [{}] ",
            self.mode.label(),
            self.clock,
            self.label.as_str()
        );
        let _ = out.flush();
    }
}

impl TimerView for TerminalTimerView {
    fn render_clock(&mut self, text: &str) {
        self.clock = text.to_string();
        self.redraw();
    }

    fn set_toggle_label(&mut self, label: ToggleLabel) {
        self.label = label;
        self.redraw();
    }

    fn highlight_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.redraw();
    }

    fn notify_complete(&mut self, mode: Mode) {
        let bell = if self.bell { "\x07" } else { "" };
        println!("\n{bell}Time's up ({})", mode.label());
    }
}

/// A line typed while the countdown is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Toggle,
    Reset,
    Mode(Mode),
    Quit,
}

pub fn parse_keystroke(line: &str) -> Option<Keystroke> {
    match line.trim() {
        "" | "p" | " " => Some(Keystroke::Toggle),
        "r" => Some(Keystroke::Reset),
        "f" => Some(Keystroke::Mode(Mode::Focus)),
        "s" => Some(Keystroke::Mode(Mode::ShortBreak)),
        "l" => Some(Keystroke::Mode(Mode::LongBreak)),
        "q" => Some(Keystroke::Quit),
        _ => None,
    }
}

const HELP: &str = "enter/p: start-pause  r: reset  f/s/l: focus/short/long  q: quit";

pub fn run(action: TimerAction) -> Result<()> {
    match action {
        TimerAction::Modes => {
            let modes: Vec<_> = Mode::ALL
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "mode": m,
                        "label": m.label(),
                        "duration_secs": m.duration_secs(),
                        "display": format_clock(m.duration_secs()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&modes)?);
        }
        TimerAction::Run { mode, start } => {
            let config = Config::load_or_default();
            let mode = mode.unwrap_or(config.timer.initial_mode);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let result = runtime.block_on(countdown(mode, start, config.timer.bell));
            // Stdin reads park a blocking thread; don't wait for it.
            runtime.shutdown_timeout(Duration::from_millis(100));
            result?;
        }
    }
    Ok(())
}

async fn countdown(mode: Mode, autostart: bool, bell: bool) -> Result<()> {
    let (tx, mut ticks) = mpsc::unbounded_channel();
    let mut engine = TimerEngine::new(mode, TokioTicks::new(tx), TerminalTimerView::new(bell));
    eprintln!("{HELP}");
    engine.view_mut().redraw();
    if autostart {
        log_event(engine.start());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(id) = ticks.recv() => {
                log_event(engine.on_tick(id));
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let event = match parse_keystroke(&line) {
                    Some(Keystroke::Toggle) => engine.toggle_running(),
                    Some(Keystroke::Reset) => engine.reset(),
                    Some(Keystroke::Mode(mode)) => engine.set_mode(mode),
                    Some(Keystroke::Quit) => break,
                    None => {
                        eprintln!("\n{HELP}");
                        None
                    }
                };
                log_event(event);
                engine.view_mut().redraw();
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    log_event(engine.stop());
    println!();
    Ok(())
}

fn log_event(event: Option<Event>) {
    if let Some(event) = event {
        tracing::info!(kind = event.kind(), "{}", serde_json::to_string(&event).unwrap_or_default());
    }
}
