use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use scout_core::{update, AppState, Msg};
use scout_logging::{scout_debug, scout_info};

use super::config::Args;
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::render::{RenderOptions, Renderer};

/// Everything the session loop reacts to.
#[derive(Debug)]
pub enum Inbox {
    Msg(Msg),
    /// `exit`/`quit` or end of input.
    Quit,
}

pub fn run_app(args: Args) -> Result<()> {
    let destination = if args.log_stderr {
        LogDestination::FileAndStderr(&args.log_file)
    } else {
        LogDestination::File(&args.log_file)
    };
    logging::initialize(destination, args.log_level())?;
    scout_info!("Starting scout against {}", args.base_url);

    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbox>();
    let runner = EffectRunner::new(args.client_settings(), inbox_tx.clone())
        .context("failed to start backend engine")?;

    let interactive = io::stdin().is_terminal();
    let mut renderer = Renderer::new(RenderOptions {
        echo_user: !interactive,
        prompt: interactive,
    });
    let stdout = io::stdout();
    let mut out = stdout.lock();
    renderer.banner(&mut out)?;

    spawn_input_reader(inbox_tx);

    let mut session = Session {
        state: AppState::new(),
        runner,
        renderer,
    };
    let mut quit_requested = false;
    while let Ok(item) = inbox_rx.recv() {
        match item {
            Inbox::Msg(msg) => session.dispatch(msg, &mut out)?,
            Inbox::Quit => {
                scout_debug!("Quit requested");
                quit_requested = true;
            }
        }
        // A running turn cannot be cancelled; let it finish first.
        if quit_requested && !session.state.is_busy() {
            break;
        }
    }

    writeln!(out)?;
    scout_info!("Session ended with {} messages", session.state.log().len());
    Ok(())
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    renderer: Renderer,
}

impl Session {
    fn dispatch(&mut self, msg: Msg, out: &mut impl Write) -> io::Result<()> {
        if let Some(turn) = msg_turn(&msg) {
            scout_logging::set_current_turn(turn);
        }
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        scout_logging::set_current_turn(state.active_turn().unwrap_or(0));
        self.runner.enqueue(effects);

        let was_dirty = state.consume_dirty();
        let result = if was_dirty {
            self.renderer.render(&state.view(), out)
        } else {
            Ok(())
        };
        self.state = state;
        result
    }
}

fn msg_turn(msg: &Msg) -> Option<u64> {
    match msg {
        Msg::SearchFinished { turn, .. }
        | Msg::SummaryProgress { turn, .. }
        | Msg::SummaryFinished { turn, .. } => Some(*turn),
        Msg::InputChanged(_) | Msg::InputSubmitted => None,
    }
}

/// Reads stdin line by line on its own thread; each line is one submission.
fn spawn_input_reader(inbox: mpsc::Sender<Inbox>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if is_exit_command(&line) {
                break;
            }
            let submitted = inbox
                .send(Inbox::Msg(Msg::InputChanged(line)))
                .and_then(|_| inbox.send(Inbox::Msg(Msg::InputSubmitted)));
            if submitted.is_err() {
                return;
            }
        }
        let _ = inbox.send(Inbox::Quit);
    });
}

fn is_exit_command(line: &str) -> bool {
    let command = line.trim();
    command.eq_ignore_ascii_case("exit") || command.eq_ignore_ascii_case("quit")
}
