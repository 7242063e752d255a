mod display;

use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use street_shooter::audio::{self, CuePlayer};
use street_shooter::config::{Args, Config};
use street_shooter::input::{self, Command, HeldKey};
use street_shooter::session::Session;
use street_shooter::storage::JsonFileStore;
use street_shooter::Result;

use display::{Atlas, Viewport};

// ── Logging ───────────────────────────────────────────────────────────────────

/// The game owns the terminal, so log lines go to a file instead of stderr.
fn init_logging(config: &Config) -> Result<()> {
    if let Some(parent) = config.log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drive the session in real time until the player exits.
///
/// Each frame drains pending input, fires due timers, runs one tick, plays
/// the resulting cues and redraws.  Time is measured from the start of the
/// loop and handed to the session in milliseconds.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    atlas: &Atlas,
    cues: &mut dyn CuePlayer,
    rx: &mpsc::Receiver<Event>,
    frame_len: Duration,
    vp: Viewport,
) -> Result<()> {
    let clock = Instant::now();
    let mut held = HeldKey::default();

    loop {
        let frame_start = Instant::now();
        let now_ms = clock.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    held.pressed(&code, now_ms);
                    match input::on_key_down(&code, modifiers, session.screen()) {
                        Some(Command::Exit) => return Ok(()),
                        Some(command) => session.apply(command, now_ms),
                        None => {}
                    }
                }
                // Repeat: keep the key alive, never re-trigger menu actions
                KeyEventKind::Repeat => held.pressed(&code, now_ms),
                KeyEventKind::Release => {
                    held.released(&code);
                    if let Some(command) = input::on_key_up(&code) {
                        session.apply(command, now_ms);
                    }
                }
            }
        }

        if let Some(command) = held.expire(now_ms) {
            session.apply(command, now_ms);
        }

        session.update(now_ms);
        for event in session.drain_events() {
            if let Some(cue) = audio::cue_for(&event) {
                cues.play(cue);
            }
        }

        display::render(out, session, atlas, vp)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            std::thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let (cols, rows) = terminal::size()?;
    let config = Config::resolve(args, cols, rows)?;
    init_logging(&config)?;
    info!("Starting with {:?}", config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &config, Viewport { cols, rows });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("Exiting on error: {}", e);
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    vp: Viewport,
) -> Result<()> {
    display::render_loading(out, vp)?;

    let store = JsonFileStore::open(config.storage_path());
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config.canvas_width, config.canvas_height, Box::new(store), rng);

    // Start stays disabled until sprites and sounds are in place
    let atlas = Atlas::load();
    let mut cues = audio::open_player(&config.assets_dir, config.mute);
    session.mark_assets_ready();

    let frame_len = Duration::from_millis(config.frame_ms());
    game_loop(out, &mut session, &atlas, cues.as_mut(), rx, frame_len, vp)
}
