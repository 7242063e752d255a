/// Rendering layer: all terminal output lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only translates state
/// into terminal commands.  Logical canvas pixels map onto cells at
/// `CELL_WIDTH` x `CELL_HEIGHT`.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use street_shooter::compute::muzzle_flash_rect;
use street_shooter::config::{self, CELL_HEIGHT, CELL_WIDTH};
use street_shooter::entities::{Body, EnemyVariant, GameState, Pose, Rect};
use street_shooter::session::Session;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_LANE: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HIGH: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_BULLET: Color = Color::Yellow;
const C_FLASH: Color = Color::DarkYellow;
const C_DEATH: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_MENU: Color = Color::White;

const HUD_ROWS: i32 = config::HUD_ROWS as i32;
/// Street lane markings repeat every this many columns.
const LANE_SPACING: u16 = 12;

// ── Sprite art ────────────────────────────────────────────────────────────────

const PLAYER_IDLE: [&str; 7] = [
    r"    /\_/\     ",
    r"   ( o.o )    ",
    r"    > ^ <     ",
    r"   /|   |\    ",
    r"  (_|   |_)   ",
    r"    |___|     ",
    r"    /   \     ",
];

const PLAYER_RIGHT: [&str; 7] = [
    r"  /\_/\   ___ ",
    r" ( o.o )=|___|",
    r"  > ^ <   |   ",
    r" /|   |\      ",
    r"(_|   |_)     ",
    r"  |___|       ",
    r"  /   \       ",
];

const PLAYER_LEFT: [&str; 7] = [
    r" ___   /\_/\  ",
    r"|___|=( o.o ) ",
    r"   |   > ^ <  ",
    r"      /|   |\ ",
    r"     (_|   |_)",
    r"       |___|  ",
    r"       /   \  ",
];

const BULLET_ART: [&str; 2] = [r"/\", r"||"];

const FLASH_ART: [&str; 4] = [
    r"   \||/   ",
    r"  --**--  ",
    r"   /**\   ",
    r"    ||    ",
];

const DEATH_ART: [&str; 5] = [
    r" \ . | . /",
    r"  * \|/ * ",
    r"--- ** ---",
    r"  * /|\ * ",
    r" / ' | ' \",
];

/// Pre-built sprite art.  Enemy faces are generated once per variant.
pub struct Atlas {
    enemies: Vec<(EnemyVariant, Vec<String>, Color)>,
}

impl Atlas {
    pub fn load() -> Self {
        let enemies = EnemyVariant::ALL
            .iter()
            .map(|&variant| {
                let (eye, mouth, color) = enemy_look(variant);
                let art = vec![
                    r" .-''''-. ".to_string(),
                    format!("/  {eye}  {eye}  \\"),
                    format!("|  {mouth}  |"),
                    r"\        /".to_string(),
                    r" '------' ".to_string(),
                ];
                (variant, art, color)
            })
            .collect();
        Atlas { enemies }
    }

    fn enemy(&self, variant: EnemyVariant) -> (&[String], Color) {
        self.enemies
            .iter()
            .find(|(v, _, _)| *v == variant)
            .map(|(_, art, color)| (art.as_slice(), *color))
            .unwrap_or((&[][..], Color::Green))
    }
}

fn enemy_look(variant: EnemyVariant) -> (char, &'static str, Color) {
    match variant {
        EnemyVariant::Grin => ('o', r"\__/", Color::Green),
        EnemyVariant::Frown => ('o', r"/--\", Color::DarkGreen),
        EnemyVariant::Smug => ('-', r"\_~/", Color::Yellow),
        EnemyVariant::Shocked => ('O', " () ", Color::Cyan),
        EnemyVariant::Angry => ('>', "====", Color::Red),
        EnemyVariant::Sleepy => ('u', " ~~ ", Color::Magenta),
    }
}

fn player_art(pose: Pose) -> &'static [&'static str] {
    match pose {
        Pose::Idle => &PLAYER_IDLE,
        Pose::Left => &PLAYER_LEFT,
        Pose::Right => &PLAYER_RIGHT,
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal size measured at startup.  Resizing is not followed.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    fn cell_of(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / CELL_WIDTH).floor() as i32,
            (y / CELL_HEIGHT).floor() as i32 + HUD_ROWS,
        )
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.cols as i32 && row >= HUD_ROWS && row < self.rows as i32
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    session: &Session,
    atlas: &Atlas,
    vp: Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let overlays = session.screen().overlays();
    let state = session.state();

    if overlays.canvas {
        draw_background(out, vp)?;
        draw_player(out, vp, state)?;
        for bullet in &state.bullets {
            draw_art(out, vp, bullet.bounds(), &BULLET_ART, C_BULLET)?;
        }
        for enemy in &state.enemies {
            let (art, color) = atlas.enemy(enemy.variant);
            draw_art(out, vp, enemy.bounds(), art, color)?;
        }
        for effect in &state.death_effects {
            draw_art(out, vp, effect.bounds, &DEATH_ART, C_DEATH)?;
        }
    }

    draw_hud(out, vp, state, overlays.pause_control)?;

    if overlays.main_menu {
        draw_main_menu(out, vp, state)?;
    }
    if overlays.pause_menu {
        draw_box(
            out,
            vp,
            &[
                ("PAUSED".to_string(), Color::Yellow),
                (String::new(), C_MENU),
                ("R  Resume".to_string(), C_MENU),
                ("Q  Quit".to_string(), C_MENU),
            ],
        )?;
    }
    if overlays.game_over_menu {
        draw_game_over(out, vp, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Canvas ────────────────────────────────────────────────────────────────────

/// The street, turned on its side: vertical kerb lines with a dashed centre.
fn draw_background<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_LANE))?;
    let centre = vp.cols / 2;
    for row in HUD_ROWS as u16..vp.rows {
        for col in (0..vp.cols).step_by(LANE_SPACING as usize) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("│"))?;
        }
        if row % 2 == 0 {
            out.queue(cursor::MoveTo(centre, row))?;
            out.queue(Print("¦"))?;
        }
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, vp: Viewport, state: &GameState) -> std::io::Result<()> {
    let player = &state.player;
    draw_art(out, vp, player.bounds(), player_art(player.pose), C_PLAYER)?;
    if state.muzzle_flash {
        draw_art(out, vp, muzzle_flash_rect(player), &FLASH_ART, C_FLASH)?;
    }
    Ok(())
}

/// Blit `art` with its top-left at the rectangle's origin.  Spaces are
/// transparent and anything off-canvas is clipped.
fn draw_art<W: Write, S: AsRef<str>>(
    out: &mut W,
    vp: Viewport,
    rect: Rect,
    art: &[S],
    color: Color,
) -> std::io::Result<()> {
    let (col0, row0) = vp.cell_of(rect.x, rect.y);
    out.queue(style::SetForegroundColor(color))?;
    for (dy, line) in art.iter().enumerate() {
        let row = row0 + dy as i32;
        for (dx, ch) in line.as_ref().chars().enumerate() {
            let col = col0 + dx as i32;
            if ch == ' ' || !vp.contains(col, row) {
                continue;
            }
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    vp: Viewport,
    state: &GameState,
    show_pause_hint: bool,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>5}", state.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    out.queue(Print(format!("   High Score: {:>5}", state.high_score)))?;

    if show_pause_hint {
        let hint = "P: Pause";
        let col = vp.cols.saturating_sub(hint.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(hint))?;
    }
    Ok(())
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn draw_main_menu<W: Write>(out: &mut W, vp: Viewport, state: &GameState) -> std::io::Result<()> {
    draw_box(
        out,
        vp,
        &[
            ("STREET  SHOOTER".to_string(), Color::Cyan),
            (format!("High Score: {}", state.high_score), Color::Yellow),
            (String::new(), C_MENU),
            ("Enter  Start".to_string(), C_MENU),
            ("← → / A D  Move".to_string(), C_HINT),
            ("P  Pause   Q  Exit".to_string(), C_HINT),
        ],
    )
}

fn draw_game_over<W: Write>(out: &mut W, vp: Viewport, state: &GameState) -> std::io::Result<()> {
    let new_best = state.score > 0 && state.score >= state.high_score;
    let best_line = if new_best {
        format!("★ NEW BEST: {} ★", state.high_score)
    } else {
        format!("Best Score: {}", state.high_score)
    };
    draw_box(
        out,
        vp,
        &[
            ("GAME  OVER".to_string(), Color::Red),
            (format!("Final Score: {}", state.score), Color::Yellow),
            (best_line, if new_best { Color::Yellow } else { C_HINT }),
            (String::new(), C_MENU),
            ("Enter  Play Again".to_string(), C_MENU),
            ("Q  Quit".to_string(), C_MENU),
        ],
    )
}

/// Centred double-line box with one coloured line of text per row.
fn draw_box<W: Write>(out: &mut W, vp: Viewport, lines: &[(String, Color)]) -> std::io::Result<()> {
    let inner = lines
        .iter()
        .map(|(text, _)| text.chars().count())
        .max()
        .unwrap_or(0)
        + 4;
    let total_rows = lines.len() as u16 + 2;
    let left = (vp.cols / 2).saturating_sub(inner as u16 / 2 + 1);
    let top = (vp.rows / 2).saturating_sub(total_rows / 2);

    out.queue(style::SetForegroundColor(C_MENU))?;
    out.queue(cursor::MoveTo(left, top))?;
    out.queue(Print(format!("╔{}╗", "═".repeat(inner))))?;
    for (i, (text, color)) in lines.iter().enumerate() {
        let row = top + 1 + i as u16;
        let pad = inner - text.chars().count();
        let lead = pad / 2;
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(C_MENU))?;
        out.queue(Print(format!("║{}", " ".repeat(lead))))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
        out.queue(style::SetForegroundColor(C_MENU))?;
        out.queue(Print(format!("{}║", " ".repeat(pad - lead))))?;
    }
    out.queue(cursor::MoveTo(left, top + total_rows - 1))?;
    out.queue(Print(format!("╚{}╝", "═".repeat(inner))))?;
    Ok(())
}

/// Title shown while the sprite atlas is still being prepared.
pub fn render_loading<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_box(out, vp, &[("Loading…".to_string(), C_HINT)])?;
    out.flush()
}
