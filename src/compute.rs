/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle or the current time) and
/// returns a brand-new value.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::entities::{
    Body, Bullet, DeathEffect, Enemy, EnemyVariant, Facing, GameEvent, GameState, Player, Pose,
    Rect,
};

// ── Timing ────────────────────────────────────────────────────────────────────

/// One enemy per second.
pub const SPAWN_PERIOD_MS: u64 = 1000;
/// About six shots per second.
pub const SHOOT_PERIOD_MS: u64 = 167;
pub const MUZZLE_FLASH_MS: u64 = 50;

// ── Placement ─────────────────────────────────────────────────────────────────

/// Distance from the player's top edge to the bottom of the canvas.
pub const PLAYER_BOTTOM_MARGIN: f32 = 150.0;
pub const ENEMY_SPAWN_Y: f32 = -100.0;

/// Bullets leave the gun barrel, which sits this far in from the player's
/// leading side.
const BULLET_INSET_X: f32 = 90.0;
const BULLET_DROP_Y: f32 = 20.0;

const MUZZLE_INSET: f32 = 20.0;
/// Flash image size and draw offset before the -90° rotation.
const MUZZLE_IMAGE_W: f32 = 80.0;
const MUZZLE_IMAGE_H: f32 = 100.0;
const MUZZLE_OFFSET_X: f32 = -30.0;
const MUZZLE_OFFSET_Y: f32 = -40.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh play field for a canvas of the given size.
pub fn init_state(width: f32, height: f32, high_score: u32) -> GameState {
    GameState {
        player: Player::new(width / 2.0, height - PLAYER_BOTTOM_MARGIN),
        bullets: Vec::new(),
        enemies: Vec::new(),
        death_effects: Vec::new(),
        muzzle_flash: false,
        score: 0,
        high_score,
        width,
        height,
    }
}

/// Clear everything transient.  The player keeps its velocity, facing and
/// pose; only its position goes back to the start point.
pub fn reset_state(state: &GameState) -> GameState {
    let fresh = init_state(state.width, state.height, state.high_score);
    GameState {
        player: Player {
            x: fresh.player.x,
            y: fresh.player.y,
            ..state.player.clone()
        },
        ..fresh
    }
}

// ── Producers ────────────────────────────────────────────────────────────────

/// Drop one enemy in above the top edge at a random column with a random look.
pub fn spawn_enemy(state: &GameState, rng: &mut impl Rng) -> GameState {
    let span = state.width - crate::entities::ENEMY_SIZE;
    let x = if span > 0.0 { rng.gen_range(0.0..span) } else { 0.0 };
    let variant = EnemyVariant::ALL[rng.gen_range(0..EnemyVariant::ALL.len())];

    let mut enemies = state.enemies.clone();
    enemies.push(Enemy::new(x, ENEMY_SPAWN_Y, variant));
    GameState {
        enemies,
        ..state.clone()
    }
}

/// Where a new bullet appears for the player's current facing.
pub fn bullet_origin(player: &Player) -> (f32, f32) {
    let x = match player.facing {
        Facing::Right => player.x + player.width - BULLET_INSET_X,
        Facing::Left => player.x + BULLET_INSET_X,
    };
    (x, player.y + BULLET_DROP_Y)
}

/// Fire one bullet and light the muzzle flash.  No cap on bullets in flight.
pub fn player_shoot(state: &GameState) -> GameState {
    let (x, y) = bullet_origin(&state.player);
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet::new(x, y));
    GameState {
        bullets,
        muzzle_flash: true,
        ..state.clone()
    }
}

/// Screen rectangle covered by the muzzle flash.
///
/// The flash image is anchored near the gun, drawn at a fixed offset and
/// rotated a quarter turn counter-clockwise, so its width and height swap.
pub fn muzzle_flash_rect(player: &Player) -> Rect {
    let anchor_x = match player.facing {
        Facing::Right => player.x + player.width - MUZZLE_INSET,
        Facing::Left => player.x + MUZZLE_INSET,
    };
    let anchor_y = player.y + MUZZLE_INSET;
    Rect::new(
        anchor_x + MUZZLE_OFFSET_Y,
        anchor_y - (MUZZLE_OFFSET_X + MUZZLE_IMAGE_W),
        MUZZLE_IMAGE_H,
        MUZZLE_IMAGE_W,
    )
}

// ── Player movement ──────────────────────────────────────────────────────────

/// Set the pending displacement from the held direction (`None` = released).
pub fn steer(state: &GameState, direction: Option<Facing>) -> GameState {
    let speed = state.player.speed;
    let dx = match direction {
        Some(Facing::Left) => -speed,
        Some(Facing::Right) => speed,
        None => 0.0,
    };
    GameState {
        player: Player { dx, ..state.player.clone() },
        ..state.clone()
    }
}

/// Apply `dx`, turn the sprite toward the motion and keep the player fully
/// on the canvas.
pub fn move_player(player: &Player, canvas_width: f32) -> Player {
    let mut next = player.clone();
    next.x += next.dx;

    if next.dx < 0.0 {
        next.facing = Facing::Left;
        next.pose = Pose::Left;
    } else if next.dx > 0.0 {
        next.facing = Facing::Right;
        next.pose = Pose::Right;
    }

    let max_x = (canvas_width - next.width).max(0.0);
    next.x = next.x.clamp(0.0, max_x);
    next
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Result of one frame: the new state plus everything worth reacting to.
#[derive(Clone, Debug)]
pub struct TickOutcome {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl TickOutcome {
    pub fn breached(&self) -> bool {
        self.events.contains(&GameEvent::Breach)
    }
}

/// Advance the play field by one frame.
///
/// Bullets move first, then each enemy in turn falls and is checked against
/// the bottom edge and the surviving bullets.  A breach ends the frame on the
/// spot.  Removals are collected during the pass and applied afterwards, so
/// every bullet destroys at most one enemy and vice versa.
pub fn tick(state: &GameState, now_ms: u64) -> TickOutcome {
    let mut next = state.clone();
    let mut events = Vec::new();

    // ── 1. Bullets ───────────────────────────────────────────────────────────
    for bullet in next.bullets.iter_mut() {
        bullet.step();
    }
    next.bullets.retain(|b| !b.is_above_view());

    // ── 2. Enemies & collisions ──────────────────────────────────────────────
    let mut spent = vec![false; next.bullets.len()];
    let mut killed = vec![false; next.enemies.len()];

    for ei in 0..next.enemies.len() {
        next.enemies[ei].step();
        let enemy_box = next.enemies[ei].bounds();

        if enemy_box.bottom() >= next.height {
            sweep(&mut next, &spent, &killed);
            events.push(GameEvent::Breach);
            return TickOutcome { state: next, events };
        }

        let hit = next
            .bullets
            .iter()
            .enumerate()
            .find(|(bi, b)| !spent[*bi] && b.bounds().overlaps(&enemy_box))
            .map(|(bi, _)| bi);

        if let Some(bi) = hit {
            spent[bi] = true;
            killed[ei] = true;
            next.death_effects.push(DeathEffect::new(enemy_box, now_ms));
            events.push(GameEvent::EnemyKilled);

            next.score += 1;
            events.push(GameEvent::ScoreChanged(next.score));
            if next.score > next.high_score {
                next.high_score = next.score;
                events.push(GameEvent::HighScoreBeaten(next.high_score));
            }
        }
    }
    sweep(&mut next, &spent, &killed);

    // ── 3. Death effects ─────────────────────────────────────────────────────
    next.death_effects.retain(|fx| !fx.is_expired(now_ms));

    // ── 4. Player ────────────────────────────────────────────────────────────
    next.player = move_player(&next.player, next.width);

    TickOutcome { state: next, events }
}

/// Drop every bullet and enemy flagged during the collision pass.
fn sweep(state: &mut GameState, spent: &[bool], killed: &[bool]) {
    let mut spent = spent.iter();
    state.bullets.retain(|_| !spent.next().copied().unwrap_or(false));
    let mut killed = killed.iter();
    state.enemies.retain(|_| !killed.next().copied().unwrap_or(false));
}
