/// All game entity types: plain data plus the per-type motion step.
///
/// Coordinates are logical canvas pixels with the origin at the top-left
/// corner and y growing downward.  The renderer decides how pixels map onto
/// terminal cells; nothing in here knows about the terminal.

// ── Dimensions & speeds ───────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 150.0;
pub const PLAYER_SPEED: f32 = 15.0;

pub const BULLET_WIDTH: f32 = 20.0;
pub const BULLET_HEIGHT: f32 = 40.0;
/// Upward travel per tick.
pub const BULLET_SPEED: f32 = 30.0;

pub const ENEMY_SIZE: f32 = 100.0;
/// Downward travel per tick.
pub const ENEMY_FALL_SPEED: f32 = 2.0;

pub const DEATH_EFFECT_MS: u64 = 100;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Anything that occupies a rectangle and advances by a fixed step per tick.
pub trait Body {
    fn bounds(&self) -> Rect;
    fn step(&mut self);
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Which player sprite is shown.  Starts as `Idle` and switches to a
/// directional pose the first time the player moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    Idle,
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Pending horizontal displacement, one of `-speed`, `0`, `+speed`.
    pub dx: f32,
    pub facing: Facing,
    pub pose: Pose,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Player {
            x,
            y,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            dx: 0.0,
            facing: Facing::Right,
            pose: Pose::Idle,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bullet {
    pub fn new(x: f32, y: f32) -> Self {
        Bullet { x, y, width: BULLET_WIDTH, height: BULLET_HEIGHT }
    }

    /// True once the whole bullet has left through the top edge.
    pub fn is_above_view(&self) -> bool {
        self.y + self.height < 0.0
    }
}

impl Body for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn step(&mut self) {
        self.y -= BULLET_SPEED;
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// The six enemy looks.  Purely cosmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyVariant {
    Grin,
    Frown,
    Smug,
    Shocked,
    Angry,
    Sleepy,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 6] = [
        EnemyVariant::Grin,
        EnemyVariant::Frown,
        EnemyVariant::Smug,
        EnemyVariant::Shocked,
        EnemyVariant::Angry,
        EnemyVariant::Sleepy,
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub variant: EnemyVariant,
}

impl Enemy {
    pub fn new(x: f32, y: f32, variant: EnemyVariant) -> Self {
        Enemy { x, y, width: ENEMY_SIZE, height: ENEMY_SIZE, variant }
    }
}

impl Body for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn step(&mut self) {
        self.y += ENEMY_FALL_SPEED;
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

/// Short-lived splat left where an enemy was destroyed.
#[derive(Clone, Debug, PartialEq)]
pub struct DeathEffect {
    pub bounds: Rect,
    pub created_ms: u64,
    pub duration_ms: u64,
}

impl DeathEffect {
    pub fn new(bounds: Rect, created_ms: u64) -> Self {
        DeathEffect { bounds, created_ms, duration_ms: DEATH_EFFECT_MS }
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_ms) > self.duration_ms
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Things that happened during a tick or a timer firing.  The session
/// reacts to `HighScoreBeaten` and `Breach`; the front end turns `Fired` and
/// `EnemyKilled` into sound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Fired,
    EnemyKilled,
    ScoreChanged(u32),
    HighScoreBeaten(u32),
    /// An enemy reached the bottom edge.
    Breach,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything one play session mutates.  Cloneable so pure update functions
/// can return a new copy without touching the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Creation order; earlier bullets win collision ties.
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub death_effects: Vec<DeathEffect>,
    pub muzzle_flash: bool,
    pub score: u32,
    pub high_score: u32,
    pub width: f32,
    pub height: f32,
}
