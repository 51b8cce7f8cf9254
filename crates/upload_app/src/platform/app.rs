use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use sync_logging::{sync_debug, sync_info, sync_warn};
use upload_core::{update, AppState, Msg, TaskRegistry, TransferControl};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::input::{parse_line, Input, HELP};
use super::logging;
use super::session::SessionContext;
use super::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(20);
const TICK_INTERVAL: Duration = Duration::from_millis(250);

enum AppEvent {
    Line(String),
    InputClosed,
    Tick,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading upload monitor configuration")?;
    logging::initialize(config.log_destination, config.level_filter()?);
    sync_info!("upload monitor starting, endpoint {}", config.endpoint);

    // The transfer engine attaches to this registry through its lifecycle hooks.
    let registry: Arc<dyn TransferControl> = Arc::new(TaskRegistry::new());
    let context = SessionContext::from_env(registry);
    let runner = EffectRunner::new(config.channel_settings(), context);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    spawn_input_reader(event_tx.clone());
    spawn_ticker(event_tx);

    let mut shell = Shell::new(AppState::with_query(config.initial_query()), runner);
    println!("{HELP}");
    // The page connects as soon as it is shown; later reconnects are manual.
    shell.dispatch(Msg::ConnectRequested);
    shell.flush_output();

    loop {
        match event_rx.recv_timeout(POLL_INTERVAL) {
            Ok(AppEvent::Line(line)) => match parse_line(&line) {
                Ok(Some(Input::Dispatch(msg))) => shell.dispatch(msg),
                Ok(Some(Input::Help)) => println!("{HELP}"),
                Ok(Some(Input::Quit)) => break,
                Ok(None) => {}
                Err(err) => println!("{err}"),
            },
            Ok(AppEvent::Tick) => shell.tick(),
            Ok(AppEvent::InputClosed) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
        for msg in shell.runner.drain_messages() {
            shell.dispatch(msg);
        }
        shell.flush_output();
    }

    shell.dispatch(Msg::DisconnectRequested);
    // Give the transport a moment to send the close frame.
    thread::sleep(Duration::from_millis(100));
    sync_info!("upload monitor stopped");
    Ok(())
}

/// Single consumer of every message: input, ticks and channel events all
/// pass through [`Shell::dispatch`] in arrival order.
struct Shell {
    state: AppState,
    runner: EffectRunner,
    dispatched: u64,
    seen_revision: u64,
}

impl Shell {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        let seen_revision = runner.context().transfers().revision();
        Self {
            state,
            runner,
            dispatched: 0,
            seen_revision,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        self.dispatched += 1;
        sync_logging::set_dispatch_seq(self.dispatched);
        sync_debug!("#{} dispatch {:?}", self.dispatched, msg);

        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn tick(&mut self) {
        let revision = self.runner.context().transfers().revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.dispatch(Msg::LivenessChanged);
        }
        self.dispatch(Msg::Tick);
    }

    fn flush_output(&mut self) {
        for notice in self.state.drain_notices() {
            println!("{}", ui::render::render_notice(&notice));
        }
        if self.state.consume_dirty() {
            let view = self.state.view(self.runner.context().transfers());
            print!("{}", ui::render::render(&view));
            let _ = io::stdout().flush();
        }
    }
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if event_tx.send(AppEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    sync_warn!("failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

// Background tick to notice registry changes and coalesce rendering.
fn spawn_ticker(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while event_tx.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });
}
