mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use sky_burger::catalog::{clamp_level, lookup};
use sky_burger::compute::{
    abandon_attempt, finalize_attempt, init_state, move_catcher_left, move_catcher_right,
    ready_to_finalize, settle_before_exit, tick,
};
use sky_burger::config::GameConfig;
use sky_burger::entities::AttemptState;
use sky_burger::progress::{FileProgressStore, ProgressStore};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Held-key constants ────────────────────────────────────────────────────────

/// Min frames between catcher movements while a direction key is held.
/// 3 frames @ 30 FPS ≈ 10 moves/sec (≈ normal OS key-repeat feel).
const MOVE_COOLDOWN: u32 = 3;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Files in $HOME ────────────────────────────────────────────────────────────

fn home_file(name: &str) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(name)
}

/// Log to a file: stderr shares the terminal with the game.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(home_file(".sky_burger.log")) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    store: &FileProgressStore,
) -> Result<MenuResult> {
    let progress = store.load();
    let definition = lookup(clamp_level(progress.unlocked_level))?;
    display::render_menu(out, &progress, &definition)?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            // Input thread is gone; nothing can reach the menu any more.
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame we check which keys are
/// still "fresh" (within `HOLD_WINDOW` frames) and move accordingly.
/// Keyboard-enhanced terminals also deliver `Release`, which drops the key
/// immediately.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut AttemptState,
    rx: &mpsc::Receiver<Event>,
    store: &mut FileProgressStore,
) -> Result<bool> {
    let mut rng = thread_rng();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut move_cooldown: u32 = 0;
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last);
        last = frame_start;
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            settle_before_exit(state, store).context("saving progress")?;
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            settle_before_exit(state, store).context("saving progress")?;
                            return Ok(true);
                        }
                        KeyCode::Char('x') | KeyCode::Char('X') if !state.is_finished() => {
                            *state = abandon_attempt(state);
                        }
                        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R')
                            if state.report.is_some() =>
                        {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Apply held-key movement ───────────────────────────────────────────
        if !state.is_finished() && move_cooldown == 0 {
            let left = is_held(&key_frame, &KeyCode::Left, frame)
                || is_held(&key_frame, &KeyCode::Char('a'), frame)
                || is_held(&key_frame, &KeyCode::Char('A'), frame);
            let right = is_held(&key_frame, &KeyCode::Right, frame)
                || is_held(&key_frame, &KeyCode::Char('d'), frame)
                || is_held(&key_frame, &KeyCode::Char('D'), frame);

            if left {
                *state = move_catcher_left(state);
                move_cooldown = MOVE_COOLDOWN;
            } else if right {
                *state = move_catcher_right(state);
                move_cooldown = MOVE_COOLDOWN;
            }
        }
        move_cooldown = move_cooldown.saturating_sub(1);

        if state.report.is_none() {
            *state = tick(state, dt, &mut rng);
        }

        if ready_to_finalize(state) {
            *state = finalize_attempt(state, store).context("saving progress")?;
        }

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("sky_burger exited with an error: {err:#}");
    }
    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<()> {
    let config = GameConfig::load_or_default(home_file(".sky_burger.toml"));
    let mut store = FileProgressStore::new(home_file(".sky_burger_progress.toml"));

    loop {
        match show_menu(out, rx, &store)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let progress = store.load();
                let definition = lookup(clamp_level(progress.unlocked_level))?;
                let (width, height) = terminal::size()?;
                let mut state = init_state(definition, &config, width, height);
                if game_loop(out, &mut state, rx, &mut store)? {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
