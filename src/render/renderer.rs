use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{FruitKind, GameSnapshot, Phase, Position, GRID_SIZE};
use crate::metrics::GameMetrics;

fn fruit_color(kind: FruitKind) -> Color {
    match kind {
        FruitKind::Apple => Color::Red,
        FruitKind::Banana => Color::Yellow,
        FruitKind::Grape => Color::Magenta,
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
        paused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with run stats and active effect badges
        let stats = self.render_stats(chunks[0], snapshot, metrics, paused);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        // Render game grid, the idle screen, or the game over screen
        match snapshot.phase {
            Phase::Running => {
                let grid = self.render_grid(game_area, snapshot);
                frame.render_widget(grid, game_area);
            }
            Phase::Idle => {
                let idle = self.render_idle(game_area);
                frame.render_widget(idle, game_area);
            }
            Phase::GameOver => {
                let game_over = self.render_game_over(game_area, snapshot, metrics);
                frame.render_widget(game_over, game_area);
            }
        }

        // Render footer with controls
        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let head = snapshot.snake.first().copied();
        let mut lines = Vec::new();

        for y in 0..GRID_SIZE {
            let mut spans = Vec::new();

            for x in 0..GRID_SIZE {
                let pos = Position::new(x, y);

                let cell = if Some(pos) == head {
                    // Snake head - distinct color
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    // Snake body
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food.cell {
                    Span::styled(
                        format!("{} ", snapshot.food.kind.glyph()),
                        Style::default()
                            .fg(fruit_color(snapshot.food.kind))
                            .add_modifier(Modifier::BOLD),
                    )
                } else if let Some(item) = snapshot.power_up.filter(|item| item.cell == pos) {
                    Span::styled(
                        format!("{} ", item.kind.glyph()),
                        Style::default()
                            .fg(Color::LightMagenta)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    // Empty cell
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(format!(" Snake - {} ", snapshot.mode.label())),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        _area: Rect,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
        paused: bool,
    ) -> Paragraph<'_> {
        let mut top = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Apples: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.apples.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Combo: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("x{}", snapshot.combo),
                Style::default().fg(if snapshot.combo >= 3 {
                    Color::LightRed
                } else {
                    Color::White
                }),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Session: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];

        if let Some(remaining) = snapshot.time_remaining {
            top.push(Span::raw("    "));
            top.push(Span::styled("Time: ", Style::default().fg(Color::Yellow)));
            let secs = remaining.as_secs_f64();
            top.push(Span::styled(
                format!("{secs:05.1}s"),
                Style::default().fg(if secs < 10.0 {
                    Color::LightRed
                } else {
                    Color::White
                }),
            ));
        }

        if paused {
            top.push(Span::raw("    "));
            top.push(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let mut badges = Vec::new();
        for status in &snapshot.active_effects {
            if !badges.is_empty() {
                badges.push(Span::raw("  "));
            }
            badges.push(Span::styled(
                format!(
                    "{} {:.1}s",
                    status.kind.label(),
                    status.remaining.as_secs_f64()
                ),
                Style::default().fg(Color::LightMagenta),
            ));
        }

        Paragraph::new(vec![Line::from(top), Line::from(badges)]).alignment(Alignment::Center)
    }

    fn render_idle(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "ARCADE SNAKE",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled("1", Style::default().fg(Color::Green)),
                Span::styled(" classic  ", Style::default().fg(Color::Gray)),
                Span::styled("2", Style::default().fg(Color::Green)),
                Span::styled(" walls  ", Style::default().fg(Color::Gray)),
                Span::styled("3", Style::default().fg(Color::Green)),
                Span::styled(" chill", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_game_over(
        &self,
        _area: Rect,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Apples: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.apples.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Max Combo: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("x{}", snapshot.max_combo),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(vec![
                Span::styled("Session Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart, ", Style::default().fg(Color::Gray)),
                Span::styled("1/2/3", Style::default().fg(Color::Green)),
                Span::styled(" to switch mode, or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
