//! Terminal Blockfall runner (default binary).
//!
//! One game step per `BLOCKFALL_STEP_MS`: keys pressed during the step are
//! buffered, and the oldest one is handed to the session when the step ends.
//! Rendering goes through the framebuffer/diff renderer.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use tui_blockfall::core::{GameSnapshot, Session};
use tui_blockfall::input::{map_key_event, InputBuffer};
use tui_blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::{InputEvent, GAME_OVER_HOLD_MS};
use tui_blockfall::{logging, Config, Replay, ReplayRecorder};

fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init(config.log_path.as_deref())?;
    info!("starting: seed {}, step {} ms", config.seed, config.step_ms);

    let mut session = Session::standard(config.seed);
    let mut recorder = ReplayRecorder::new(Replay::standard(config.seed));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &mut recorder, &config);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(path) = &config.record_path {
        match recorder.replay().save(path) {
            Ok(()) => info!("replay saved to {}", path.display()),
            Err(e) => warn!("could not save replay to {}: {}", path.display(), e),
        }
    }

    result?;

    println!(
        "Final score: {}  level: {}  lines: {}",
        session.score(),
        session.level() + 1,
        session.lines()
    );
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut Session,
    recorder: &mut ReplayRecorder,
    config: &Config,
) -> Result<()> {
    let view = GameView::default();
    let mut input = InputBuffer::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let step = config.step_duration();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            session.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        if session.game_over() {
            thread::sleep(Duration::from_millis(GAME_OVER_HOLD_MS));
            return Ok(());
        }

        // Collect keys until the step deadline.
        let deadline = Instant::now() + step;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(ev) = map_key_event(key) {
                        input.push(ev);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
            if input.quit_requested() {
                break;
            }
        }

        if input.quit_requested() {
            recorder.record(InputEvent::Quit);
            info!(
                "quit at step {}: score {}, level {}",
                session.steps(),
                session.score(),
                session.level() + 1
            );
            return Ok(());
        }

        let ev = input.next_event();
        recorder.record(ev);
        let outcome = session.step(ev);
        dirty |= outcome.redraw || outcome.game_over;
    }
}
