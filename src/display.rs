/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use sky_burger::compute::sunk_rows;
use sky_burger::entities::{
    ingredient_name, AttemptState, FallingIngredient, FinishReport, IngredientKind,
    LevelDefinition, ProgressState,
};
use sky_burger::evaluator::status_label;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TITLE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HUD_MONEY: Color = Color::Green;
const C_MISSION_OPEN: Color = Color::White;
const C_MISSION_DONE: Color = Color::Green;
const C_BUN: Color = Color::DarkYellow;
const C_FLYING_AWAY: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

/// Three-column glyph and colour for each ingredient.
fn ingredient_look(kind: IngredientKind) -> (&'static str, Color) {
    match kind {
        0 => ("◠◠◠", C_BUN),
        1 => ("███", Color::DarkRed),
        2 => ("▀▀▀", Color::Yellow),
        3 => ("≈≈≈", Color::Green),
        4 => ("(●)", Color::Red),
        5 => ("ooo", Color::Magenta),
        6 => ("~~~", Color::DarkGreen),
        7 => ("▬▬▬", Color::DarkMagenta),
        8 => ("(◉)", Color::White),
        9 => ("♣♣♣", Color::Grey),
        10 => ("▒▒▒", Color::Red),
        11 => ("◖◗ ", Color::DarkGreen),
        _ => ("???", Color::DarkGrey),
    }
}

fn centred_col(width: u16, text: &str) -> u16 {
    (width / 2).saturating_sub(text.chars().count() as u16 / 2)
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &AttemptState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, state)?;
    draw_hud(out, state)?;

    for ingredient in &state.falling {
        draw_falling(out, ingredient)?;
    }
    draw_stack(out, state)?;
    draw_catcher(out, state)?;
    draw_controls_hint(out, state)?;

    if let Some(report) = &state.report {
        draw_finish_report(out, state, report)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, state.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Main menu: progress, money and the next level's order.
pub fn render_menu<W: Write>(
    out: &mut W,
    progress: &ProgressState,
    definition: &LevelDefinition,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cy = height / 2;
    let left = (width / 2).saturating_sub(12);

    let title = "★  SKY  BURGER  ★";
    out.queue(cursor::MoveTo(centred_col(width, title), cy.saturating_sub(8)))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(left, cy.saturating_sub(6)))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("Level {}", definition.level)))?;
    out.queue(style::SetForegroundColor(C_HUD_MONEY))?;
    out.queue(Print(format!("   Money ${:.2}", progress.currency)))?;

    out.queue(cursor::MoveTo(left, cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Today's order:"))?;

    for (i, mission) in definition.missions.iter().enumerate() {
        let row = cy.saturating_sub(3) + i as u16;
        let (glyph, color) = ingredient_look(mission.kind);
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(format!(
            " {:<9} x {}",
            ingredient_name(mission.kind),
            mission.required
        )))?;
    }

    let finisher_row = cy + 4;
    let (glyph, color) = ingredient_look(0);
    out.queue(cursor::MoveTo(left, finisher_row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(" Top Bun before the order is done loses"))?;

    out.queue(cursor::MoveTo(left, finisher_row + 2))?;
    out.queue(Print("ENTER / SPACE : Start   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, state: &AttemptState) -> std::io::Result<()> {
    let w = state.width as usize;
    let h = state.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(state.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &AttemptState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("Lv {:<2}", state.level())))?;
    out.queue(style::SetForegroundColor(C_HUD_MONEY))?;
    out.queue(Print(format!(" ${:<6.2}", state.money_made())))?;

    // Missions — right-aligned, one "glyph remaining" cell each
    let cells: Vec<(IngredientKind, String, bool)> = state
        .statuses
        .iter()
        .map(|s| (s.kind, status_label(s), s.satisfied))
        .collect();
    let cells_width: usize = cells.iter().map(|(_, label, _)| 5 + label.chars().count()).sum();
    let mut col = state.width.saturating_sub(cells_width as u16 + 1);

    for (kind, label, satisfied) in &cells {
        let (glyph, color) = ingredient_look(*kind);
        out.queue(cursor::MoveTo(col, 0))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
        out.queue(style::SetForegroundColor(if *satisfied {
            C_MISSION_DONE
        } else {
            C_MISSION_OPEN
        }))?;
        out.queue(Print(format!(" {} ", label)))?;
        col += 5 + label.chars().count() as u16;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_falling<W: Write>(out: &mut W, ingredient: &FallingIngredient) -> std::io::Result<()> {
    let (glyph, color) = ingredient_look(ingredient.kind);
    let row = ingredient.y.floor() as i32;
    if row < 2 {
        return Ok(());
    }
    out.queue(cursor::MoveTo((ingredient.x - 1).max(1) as u16, row as u16))?;
    out.queue(style::SetForegroundColor(if ingredient.flying_away {
        C_FLYING_AWAY
    } else {
        color
    }))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Caught ingredients piled on the catcher, bottom layer first.
fn draw_stack<W: Write>(out: &mut W, state: &AttemptState) -> std::io::Result<()> {
    let base = state.catcher.y - 1 + sunk_rows(state);
    let x = (state.catcher.x - 1).max(1) as u16;
    for (i, kind) in state.stack.iter().enumerate() {
        let row = base - i as i32;
        if row >= state.catcher.y || row < 2 {
            continue;
        }
        let (glyph, color) = ingredient_look(*kind);
        out.queue(cursor::MoveTo(x, row as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_catcher<W: Write>(out: &mut W, state: &AttemptState) -> std::io::Result<()> {
    // Bottom bun, 5 columns wide:
    //  ╘═══╛
    let c = &state.catcher;
    out.queue(style::SetForegroundColor(C_BUN))?;
    out.queue(cursor::MoveTo((c.x - 2).max(1) as u16, c.y as u16))?;
    out.queue(Print("╘═══╛"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &AttemptState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, state.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   X : Give up   Q : Quit"))?;
    Ok(())
}

// ── Finish overlay ────────────────────────────────────────────────────────────

fn draw_finish_report<W: Write>(
    out: &mut W,
    state: &AttemptState,
    report: &FinishReport,
) -> std::io::Result<()> {
    let (headline, color) = if report.won {
        (format!("Level {}   Completed!", report.level), Color::Green)
    } else {
        (format!("Level {}   Failed!", report.level), Color::Red)
    };

    let lines: Vec<(String, Color)> = vec![
        ("╔══════════════════════════╗".to_string(), color),
        (format!("║ {:^24} ║", headline), color),
        ("╚══════════════════════════╝".to_string(), color),
        (format!("Money  ${:>8.2}", report.payout), Color::White),
        (format!("Tip    ${:>8.2}", report.gratuity), Color::White),
        (format!("Total  ${:>8.2}", report.total), Color::Yellow),
        ("ENTER - Continue  Q - Quit".to_string(), Color::White),
    ];

    let start_row = (state.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(centred_col(state.width, text), start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }

    Ok(())
}
