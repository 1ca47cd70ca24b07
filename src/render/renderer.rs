use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::assets::{CELL_COLUMNS, Sprites};
use crate::game::{CellKind, GameOverOverlay, Position, RenderSnapshot};

// Smallest box that fits the three overlay lines with blank lines around them
const OVERLAY_WIDTH: u16 = 28;
const OVERLAY_HEIGHT: u16 = 9;

pub struct Renderer {
    sprites: Sprites,
}

impl Renderer {
    pub fn new(sprites: Sprites) -> Self {
        Self { sprites }
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &RenderSnapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot);
        frame.render_widget(stats, chunks[0]);

        let board_width = board_side(snapshot.grid_width.saturating_mul(CELL_COLUMNS));
        let board_height = board_side(snapshot.grid_height);

        if let Some(overlay) = &snapshot.overlay {
            let area = Self::centered(
                chunks[1],
                board_width.max(OVERLAY_WIDTH),
                board_height.max(OVERLAY_HEIGHT),
            );
            frame.render_widget(self.render_game_over(overlay), area);
        } else {
            let area = Self::centered(chunks[1], board_width, board_height);
            frame.render_widget(self.render_grid(snapshot), area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// A `width` x `height` rectangle centred in `area`
    fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let column = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(width),
                Constraint::Min(0),
            ])
            .split(area)[1];

        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(height),
                Constraint::Min(0),
            ])
            .split(column)[1]
    }

    fn render_grid(&self, snapshot: &RenderSnapshot) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(snapshot.grid_height);

        let columns = i32::try_from(snapshot.grid_width).unwrap_or(i32::MAX);
        let rows = i32::try_from(snapshot.grid_height).unwrap_or(i32::MAX);

        for y in 0..rows {
            let mut spans = Vec::with_capacity(snapshot.grid_width);

            for x in 0..columns {
                let pos = Position::new(x, y);

                let cell = match snapshot.cell_at(pos) {
                    Some(CellKind::Head) => Span::styled(
                        self.sprites.head.as_str(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(CellKind::Body) => Span::styled(
                        self.sprites.body.as_str(),
                        Style::default().fg(Color::Green),
                    ),
                    None if pos == snapshot.food => Span::styled(
                        self.sprites.food.as_str(),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, snapshot: &RenderSnapshot) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.length.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Eaten: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.score.to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over<'a>(&self, overlay: &'a GameOverOverlay) -> Paragraph<'a> {
        let mut text = vec![Line::from("")];

        for (i, line) in overlay.lines.iter().enumerate() {
            let style = match i {
                0 => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                1 => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                _ => Style::default().fg(Color::Gray),
            };
            text.push(Line::from(Span::styled(line.as_str(), style)));
            text.push(Line::from(""));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// Bordered length of `cells` terminal cells, clamped to what a `Rect` can hold
fn board_side(cells: usize) -> u16 {
    u16::try_from(cells.saturating_add(2)).unwrap_or(u16::MAX)
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Sprites::default())
    }
}
