//! Interactive TUI.
//!
//! One task runs the event loop: it renders the controller, waits for either
//! a key press or an asynchronous result, feeds the event to the controller
//! and carries out the returned effects. Discovery runs, kill requests and the
//! watch timer run as spawned tasks that report back through one channel.

mod keymap;
mod ui;

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{Event as TermEvent, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tapas_core::{
    Controller, ControllerSettings, Effect, Event, PlatformDiscovery, ProcessKiller,
    ProcessKillerPort,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::commands::Settings;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(settings: &Settings) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, settings).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_loop(terminal: &mut Tui, settings: &Settings) -> Result<()> {
    let config = &settings.config;
    let mut controller = Controller::new(ControllerSettings {
        sort_key: config.default_sort,
        watch_enabled: settings.watch,
        watch_interval: config.watch_period(),
    });
    let options = ui::RenderOptions {
        ascii: config.ascii_indicators,
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut runtime = EffectRunner {
        discovery: Arc::new(PlatformDiscovery::from_config(config)),
        killer: Arc::new(ProcessKiller::new()),
        tx,
        watch_timer: None,
    };

    let mut quit = runtime.execute(controller.init());
    let mut term_events = EventStream::new();

    while !quit {
        terminal.draw(|frame| ui::draw(frame, &controller, &options))?;

        let event = tokio::select! {
            Some(event) = rx.recv() => event,
            maybe_event = term_events.next() => match maybe_event {
                Some(Ok(TermEvent::Key(key))) => match keymap::map_key(controller.mode(), key) {
                    Some(event) => event,
                    None => continue,
                },
                // Resize and friends only need a redraw.
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    runtime.shutdown();
                    return Err(e.into());
                }
                None => break,
            },
        };

        quit = runtime.execute(controller.handle(event));
    }

    runtime.shutdown();
    Ok(())
}

/// Carries out controller effects and routes their results back as events.
struct EffectRunner {
    discovery: Arc<PlatformDiscovery>,
    killer: Arc<ProcessKiller>,
    tx: mpsc::UnboundedSender<Event>,
    watch_timer: Option<JoinHandle<()>>,
}

impl EffectRunner {
    /// Run the effects. Returns true once `Quit` was requested.
    fn execute(&mut self, effects: Vec<Effect>) -> bool {
        let mut quit = false;
        for effect in effects {
            debug!(?effect, "Executing effect");
            match effect {
                Effect::Refresh => self.refresh(),
                Effect::ScheduleWatchTick { generation, after } => {
                    self.cancel_watch();
                    let tx = self.tx.clone();
                    self.watch_timer = Some(tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        let _ = tx.send(Event::WatchTick(generation));
                    }));
                }
                Effect::CancelWatchTick => self.cancel_watch(),
                Effect::Terminate { pid, port, force } => self.terminate(pid, port, force),
                Effect::Quit => quit = true,
            }
        }
        quit
    }

    fn refresh(&self) {
        let discovery = Arc::clone(&self.discovery);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = discovery.run().await.map_err(|e| e.to_string());
            let _ = tx.send(Event::RefreshCompleted(result));
        });
    }

    fn terminate(&self, pid: i32, port: u16, force: bool) {
        let killer = Arc::clone(&self.killer);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            info!(pid, port, force, "Terminating process");
            let result = if force {
                killer.force_terminate(pid)
            } else {
                killer.terminate(pid)
            };
            let _ = tx.send(Event::KillCompleted(result.map_err(|e| e.to_string())));
        });
    }

    fn cancel_watch(&mut self) {
        if let Some(timer) = self.watch_timer.take() {
            timer.abort();
        }
    }

    fn shutdown(&mut self) {
        self.cancel_watch();
    }
}
