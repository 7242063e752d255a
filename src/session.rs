/// Menu/session state machine.
///
/// A `Session` owns every piece of mutable game state: the play field, the
/// timers that feed it, the high-score store and the RNG.  The front end
/// forwards commands and the current time; the session decides what they
/// mean on the current screen.

use log::{debug, info, warn};
use rand::rngs::StdRng;

use crate::compute::{self, MUZZLE_FLASH_MS, SHOOT_PERIOD_MS, SPAWN_PERIOD_MS};
use crate::entities::{Facing, GameEvent, GameState};
use crate::input::Command;
use crate::scheduler::Scheduler;
use crate::storage::{load_high_score, save_high_score, KeyValueStore};

// ── Screens ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    MainMenu,
    Playing,
    Paused,
    GameOver,
}

/// Which UI pieces are visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Overlays {
    pub main_menu: bool,
    pub canvas: bool,
    pub pause_control: bool,
    pub pause_menu: bool,
    pub game_over_menu: bool,
}

impl Screen {
    pub fn overlays(self) -> Overlays {
        match self {
            Screen::MainMenu => Overlays { main_menu: true, ..Overlays::default() },
            Screen::Playing => Overlays { canvas: true, pause_control: true, ..Overlays::default() },
            Screen::Paused => Overlays { canvas: true, pause_menu: true, ..Overlays::default() },
            Screen::GameOver => Overlays {
                canvas: true,
                game_over_menu: true,
                ..Overlays::default()
            },
        }
    }
}

// ── Timers ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    SpawnEnemy,
    Shoot,
    HideMuzzleFlash,
}

// ── Session ───────────────────────────────────────────────────────────────────

pub struct Session {
    screen: Screen,
    state: GameState,
    scheduler: Scheduler<Task>,
    store: Box<dyn KeyValueStore>,
    rng: StdRng,
    events: Vec<GameEvent>,
    assets_ready: bool,
}

impl Session {
    /// New session on the main menu.  The high score is read from `store`
    /// once, here.
    pub fn new(width: f32, height: f32, store: Box<dyn KeyValueStore>, rng: StdRng) -> Self {
        let high_score = load_high_score(store.as_ref());
        info!("Canvas {}x{}, high score {}", width, height, high_score);
        Session {
            screen: Screen::MainMenu,
            state: compute::init_state(width, height, high_score),
            scheduler: Scheduler::new(),
            store,
            rng,
            events: Vec::new(),
            assets_ready: false,
        }
    }

    /// Allow `Start`.  Until this is called the main menu ignores it.
    pub fn mark_assets_ready(&mut self) {
        self.assets_ready = true;
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the play field, for scripted scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.state.high_score
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn is_scheduled(&self, task: Task) -> bool {
        self.scheduler.is_scheduled(task)
    }

    /// Everything that happened since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    pub fn apply(&mut self, command: Command, now_ms: u64) {
        match command {
            Command::Start => self.start(now_ms),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(now_ms),
            Command::Quit => self.quit(),
            Command::PlayAgain => self.play_again(now_ms),
            Command::Steer(facing) => self.steer(Some(facing)),
            Command::Release => self.steer(None),
            Command::Exit => debug!("Exit is handled by the front end"),
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.screen != Screen::MainMenu || !self.assets_ready {
            debug!("Ignoring start on {:?} (assets ready: {})", self.screen, self.assets_ready);
            return;
        }
        self.reset_transient();
        self.start_producers(now_ms);
        self.screen = Screen::Playing;
        info!("Game started");
    }

    pub fn pause(&mut self) {
        if self.screen != Screen::Playing {
            debug!("Ignoring pause on {:?}", self.screen);
            return;
        }
        self.scheduler.cancel_all();
        self.state.muzzle_flash = false;
        self.screen = Screen::Paused;
        info!("Paused at score {}", self.state.score);
    }

    pub fn resume(&mut self, now_ms: u64) {
        if self.screen != Screen::Paused {
            debug!("Ignoring resume on {:?}", self.screen);
            return;
        }
        self.start_producers(now_ms);
        self.screen = Screen::Playing;
        info!("Resumed");
    }

    pub fn quit(&mut self) {
        if !matches!(self.screen, Screen::Paused | Screen::GameOver) {
            debug!("Ignoring quit on {:?}", self.screen);
            return;
        }
        self.scheduler.cancel_all();
        self.reset_transient();
        self.screen = Screen::MainMenu;
        info!("Back to main menu");
    }

    pub fn play_again(&mut self, now_ms: u64) {
        if self.screen != Screen::GameOver {
            debug!("Ignoring play again on {:?}", self.screen);
            return;
        }
        self.reset_transient();
        self.start_producers(now_ms);
        self.screen = Screen::Playing;
        info!("Game restarted");
    }

    /// Hold a direction, or stop with `None`.  Works on any screen.
    pub fn steer(&mut self, direction: Option<Facing>) {
        self.state = compute::steer(&self.state, direction);
    }

    // ── Time ──────────────────────────────────────────────────────────────────

    /// Fire every timer due by `now_ms`, then run one frame.
    pub fn update(&mut self, now_ms: u64) {
        self.advance_timers(now_ms);
        self.frame(now_ms);
    }

    /// Run the spawner, shooter and flash timers up to `now_ms`.
    pub fn advance_timers(&mut self, now_ms: u64) {
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            match fired.task {
                Task::SpawnEnemy => {
                    self.state = compute::spawn_enemy(&self.state, &mut self.rng);
                }
                Task::Shoot => {
                    self.state = compute::player_shoot(&self.state);
                    self.events.push(GameEvent::Fired);
                    self.scheduler
                        .start_once(Task::HideMuzzleFlash, fired.at_ms, MUZZLE_FLASH_MS);
                }
                Task::HideMuzzleFlash => {
                    self.state.muzzle_flash = false;
                }
            }
        }
    }

    /// One game-loop tick.  Does nothing unless a game is in progress.
    pub fn frame(&mut self, now_ms: u64) {
        if self.screen != Screen::Playing {
            return;
        }

        let outcome = compute::tick(&self.state, now_ms);
        self.state = outcome.state;

        for event in &outcome.events {
            match event {
                GameEvent::HighScoreBeaten(score) => self.persist_high_score(*score),
                GameEvent::Breach => self.game_over(),
                _ => {}
            }
        }
        self.events.extend(outcome.events);
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn game_over(&mut self) {
        self.scheduler.cancel_all();
        self.state.muzzle_flash = false;
        self.screen = Screen::GameOver;
        info!("Game over with score {}", self.state.score);
    }

    fn start_producers(&mut self, now_ms: u64) {
        self.scheduler.start_periodic(Task::SpawnEnemy, now_ms, SPAWN_PERIOD_MS);
        self.scheduler.start_periodic(Task::Shoot, now_ms, SHOOT_PERIOD_MS);
    }

    fn reset_transient(&mut self) {
        self.state = compute::reset_state(&self.state);
    }

    fn persist_high_score(&mut self, score: u32) {
        match save_high_score(self.store.as_mut(), score) {
            Ok(()) => debug!("High score {} saved", score),
            Err(e) => warn!("Failed to save high score {}: {}", score, e),
        }
    }
}
