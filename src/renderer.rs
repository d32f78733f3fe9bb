use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::config::GameMode;
use crate::entities::{Bounds, EntityKind, FULL_OPACITY, Outcome, Phase};
use crate::snapshot::{RenderSnapshot, SpriteView};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Accepts one snapshot per tick and puts it on screen.
pub trait RenderSink {
    fn present(&mut self, snapshot: &RenderSnapshot) -> color_eyre::Result<()>;
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to phase-specific renderers
    pub fn render(&self, frame: &mut Frame, snapshot: &RenderSnapshot) {
        match snapshot.phase {
            Phase::Running | Phase::Quit => self.render_game(frame, snapshot),
            Phase::Paused => self.render_paused(frame, snapshot),
            Phase::GameOver => self.render_game_over(frame, snapshot),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, snapshot: &RenderSnapshot) {
        let area = frame.area();
        let arena_area = arena_area(area, &snapshot.arena);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(arena_area);
        frame.render_widget(block, arena_area);

        // Adversaries and projectiles first so the player is drawn on top
        let buffer = frame.buffer_mut();
        for sprite in snapshot
            .sprites
            .iter()
            .filter(|sprite| sprite.kind != EntityKind::Player)
            .chain(snapshot.player())
        {
            let Some(cells) = project(&sprite.bounds, &snapshot.arena, inner) else {
                continue;
            };
            let fill = "█".repeat(usize::from(cells.width));
            let style = sprite_style(sprite);
            for row in cells.top()..cells.bottom() {
                buffer.set_string(cells.x, row, &fill, style);
            }
        }

        let mut stats = vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", snapshot.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", snapshot.health),
                if snapshot.health > 1 {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                },
            ),
        ];
        if snapshot.mode != GameMode::Classic {
            stats.push(Span::styled("  Mode: ", Style::default().fg(Color::DarkGray)));
            stats.push(Span::styled(
                snapshot.mode.label(),
                Style::default().fg(Color::Cyan),
            ));
        }
        if snapshot.mode == GameMode::Conquest {
            stats.push(Span::styled("  Kills: ", Style::default().fg(Color::DarkGray)));
            stats.push(Span::styled(
                format!("{}", snapshot.kills),
                Style::default().fg(Color::White),
            ));
        }
        if let Some(boss_health) = snapshot.boss_health {
            stats.push(Span::styled("  Boss: ", Style::default().fg(Color::DarkGray)));
            stats.push(Span::styled(
                format!("{boss_health}"),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        let stats_left = Line::from(stats);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1u16.min(area.height),
        };
        frame.render_widget(Paragraph::new(stats_left), stats_area);

        let (timer_label, timer_ms) = match snapshot.time_left_ms {
            Some(left) => ("Left: ", left),
            None => ("Time: ", snapshot.elapsed_ms),
        };
        let timer_text = Line::from(vec![
            Span::styled(timer_label, Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_countdown_or_elapsed(timer_ms, snapshot.time_left_ms.is_some()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let timer_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1u16.min(area.height),
        };
        frame.render_widget(Paragraph::new(timer_text).right_aligned(), timer_area);

        let hint = if snapshot.mode.can_fire() {
            "[WASD/Arrows: Move] [Space: Fire] [P: Pause] [Q: Quit]"
        } else {
            "[WASD/Arrows: Move] [P: Pause] [Q: Quit]"
        };
        let controls = Line::from(vec![Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1u16.min(area.height),
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, snapshot: &RenderSnapshot) {
        self.render_game(frame, snapshot);

        let area = frame.area();
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = centered_rect(area, 30, 6);
        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, snapshot: &RenderSnapshot) {
        let area = frame.area();
        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from(format!("║{:^27}║", outcome_title(snapshot.outcome)))
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", snapshot.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!(
                "Time Survived: {}",
                format_elapsed(snapshot.elapsed_ms)
            ))
            .centered()
            .cyan()
            .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            area,
        );
    }
}

/// The largest box below the HUD row and above the controls row whose shape
/// matches the arena, centred horizontally.
pub fn arena_area(area: Rect, arena: &Bounds) -> Rect {
    let available = Rect {
        x: area.x,
        y: area.y + 1u16.min(area.height),
        width: area.width,
        height: area.height.saturating_sub(2),
    };
    let ideal_width =
        (f32::from(available.height) * arena.width / arena.height * CELL_ASPECT).round() as u16;
    let width = ideal_width.min(available.width);
    Rect {
        x: available.x + (available.width - width) / 2,
        width,
        ..available
    }
}

/// Maps a rectangle in arena units onto terminal cells inside `inner`.
///
/// Partially visible sprites are clipped; sprites entirely outside the
/// arena (still above it, or drifting off a side) give `None`.
pub fn project(bounds: &Bounds, arena: &Bounds, inner: Rect) -> Option<Rect> {
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    let columns = f32::from(inner.width);
    let rows = f32::from(inner.height);
    let to_column = |x: f32| (x - arena.left()) * columns / arena.width;
    let to_row = |y: f32| (y - arena.top()) * rows / arena.height;

    let left = to_column(bounds.left()).floor().max(0.0);
    let right = to_column(bounds.right()).ceil().min(columns);
    let top = to_row(bounds.top()).floor().max(0.0);
    let bottom = to_row(bounds.bottom()).ceil().min(rows);

    if right <= left || bottom <= top {
        return None;
    }

    Some(Rect {
        x: inner.x + left as u16,
        y: inner.y + top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    })
}

fn sprite_style(sprite: &SpriteView) -> Style {
    let color = match sprite.kind {
        EntityKind::Player => Color::Green,
        EntityKind::Adversary => Color::Red,
        EntityKind::Boss => Color::Magenta,
        EntityKind::Projectile => Color::LightBlue,
    };
    let style = Style::default().fg(color);
    if sprite.opacity < FULL_OPACITY {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn format_elapsed(elapsed_ms: u64) -> String {
    let secs = elapsed_ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Countdowns round up so the clock reads 00:00 only when time is out.
fn format_countdown_or_elapsed(ms: u64, countdown: bool) -> String {
    if countdown {
        format_elapsed(ms.div_ceil(1000) * 1000)
    } else {
        format_elapsed(ms)
    }
}

fn outcome_title(outcome: Option<Outcome>) -> &'static str {
    match outcome {
        Some(Outcome::TimeUp) => "TIME UP!",
        Some(Outcome::BossDefeated) => "VICTORY!",
        Some(Outcome::Destroyed) | None => "GAME OVER!",
    }
}

/// Draws snapshots into a ratatui terminal.
pub struct TerminalSink<B: Backend> {
    terminal: Terminal<B>,
    renderer: GameRenderer,
}

impl<B: Backend> TerminalSink<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            renderer: GameRenderer::new(),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> RenderSink for TerminalSink<B> {
    fn present(&mut self, snapshot: &RenderSnapshot) -> color_eyre::Result<()> {
        let renderer = &self.renderer;
        self.terminal
            .draw(|frame| renderer.render(frame, snapshot))?;
        Ok(())
    }
}
