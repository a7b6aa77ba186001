use std::io;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::{
    Theme, GLYPH_APPLE, GLYPH_OPPONENT, GLYPH_SNAKE, GLYPH_WALL, PAUSE_LABEL, THEME_CLASSIC,
};
use crate::game::{EndReason, GameState, GameStatus};
use crate::snake::Position;

/// Anything that can paint the current game state.
///
/// Sinks only read the state; input is the only way back into the simulation.
pub trait RenderSink {
    fn draw(&mut self, state: &GameState) -> io::Result<()>;
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState) {
    let area = frame.area();
    let theme = &THEME_CLASSIC;

    render_walls(frame, area, state, theme);
    render_snake(frame, area, state, theme);
    render_apple(frame, area, state, theme);
    render_opponent(frame, area, state, theme);

    if state.status == GameStatus::Paused && state.frame_count % 2 == 0 {
        render_pause_label(frame, area, state, theme);
    }

    render_status_line(frame, area, state, theme);
}

fn render_walls(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    let bounds = state.bounds();
    let style = Style::new().fg(theme.wall);
    let buffer = frame.buffer_mut();

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !position.is_border(bounds) {
                continue;
            }
            if let Some((tx, ty)) = logical_to_terminal(area, state, position) {
                buffer.set_string(tx, ty, GLYPH_WALL, style);
            }
        }
    }
}

fn render_snake(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    let head = state.snake.head();
    let buffer = frame.buffer_mut();

    for segment in state.snake.segments() {
        let Some((x, y)) = logical_to_terminal(area, state, *segment) else {
            continue;
        };

        let mut style = Style::new().fg(theme.snake);
        if *segment == head {
            style = style.add_modifier(Modifier::BOLD);
        }
        buffer.set_string(x, y, GLYPH_SNAKE, style);
    }
}

fn render_apple(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(area, state, state.apple.position) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_APPLE, Style::new().fg(theme.apple));
}

fn render_opponent(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    let Some(opponent) = &state.opponent else {
        return;
    };

    let style = Style::new().fg(theme.opponent);
    let buffer = frame.buffer_mut();
    for segment in opponent.segments() {
        if let Some((x, y)) = logical_to_terminal(area, state, *segment) {
            buffer.set_string(x, y, GLYPH_OPPONENT, style);
        }
    }
}

fn render_pause_label(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    let bounds = state.bounds();
    let half_label = i32::try_from(PAUSE_LABEL.width() / 2).unwrap_or(0);
    let anchor = Position {
        x: i32::from(bounds.width / 2) - half_label,
        y: i32::from(bounds.height / 2),
    };

    let Some((x, y)) = logical_to_terminal(area, state, anchor) else {
        return;
    };

    frame.buffer_mut().set_string(
        x,
        y,
        PAUSE_LABEL,
        Style::new()
            .fg(theme.pause_label)
            .add_modifier(Modifier::BOLD),
    );
}

fn render_status_line(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    let board_height = state.bounds().height;
    if area.height <= board_height {
        return;
    }

    let status_area = Rect {
        x: area.x,
        y: area.y + board_height,
        width: area.width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(status_line(state)).style(Style::new().fg(theme.status_line)),
        status_area,
    );
}

fn status_line(state: &GameState) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("Length: {}", state.snake.len()))];

    if let Some(opponent) = &state.opponent {
        spans.push(Span::raw(format!("  Opponent: {}", opponent.len())));
    }
    if state.settings().no_clip {
        spans.push(Span::raw("  no-clip"));
    }

    let tail = match (state.status, state.end_reason) {
        (GameStatus::Paused, _) => "  [paused]",
        (GameStatus::Over, Some(EndReason::WallCollision)) => "  hit wall",
        (GameStatus::Over, Some(EndReason::SelfCollision)) => "  hit yourself",
        (GameStatus::Over, Some(EndReason::OpponentCollision)) => "  hit opponent",
        (GameStatus::Over, Some(EndReason::Quit)) => "  quit",
        _ => "",
    };
    if !tail.is_empty() {
        spans.push(Span::raw(tail));
    }

    Line::from(spans)
}

fn logical_to_terminal(area: Rect, state: &GameState, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(state.bounds()) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = area.x.saturating_add(x_offset);
    let y = area.y.saturating_add(y_offset);
    if x >= area.right() || y >= area.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    use crate::apple::Apple;
    use crate::config::{GameSettings, GridSize};
    use crate::game::GameState;
    use crate::snake::{Position, Snake};

    use super::render;

    const BOARD: GridSize = GridSize {
        width: 12,
        height: 10,
    };

    fn draw(state: &GameState) -> Buffer {
        let backend = TestBackend::new(30, 12);
        let mut terminal = Terminal::new(backend).expect("test backend never fails");
        terminal
            .draw(|frame| render(frame, state))
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    fn symbol(buffer: &Buffer, x: u16, y: u16) -> &str {
        buffer[(x, y)].symbol()
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| symbol(buffer, x, y).to_owned())
            .collect()
    }

    fn scripted_state(settings: GameSettings) -> GameState {
        let mut state = GameState::new_with_seed(settings, BOARD, 9).expect("board has room");
        state.snake = Snake::from_segments(vec![Position::new(5, 4), Position::new(4, 4)]);
        state.apple = Apple::at(Position::new(8, 6));
        state
    }

    #[test]
    fn board_cells_use_single_character_tokens() {
        let state = scripted_state(GameSettings {
            opponent_enabled: true,
            ..GameSettings::default()
        });

        let buffer = draw(&state);

        assert_eq!(symbol(&buffer, 0, 0), "#");
        assert_eq!(symbol(&buffer, 11, 9), "#");
        assert_eq!(symbol(&buffer, 5, 4), "S");
        assert_eq!(symbol(&buffer, 4, 4), "S");
        assert_eq!(symbol(&buffer, 8, 6), "A");
        assert_eq!(symbol(&buffer, 2, 2), "O");
        assert_eq!(symbol(&buffer, 3, 3), " ");
        assert!(row(&buffer, 10).starts_with("Length: 2  Opponent: 1"));
    }

    #[test]
    fn pause_label_blinks_on_even_frames() {
        let mut state = scripted_state(GameSettings::default());
        state.toggle_pause();

        state.frame_count = 4;
        assert!(row(&draw(&state), 5).contains("Pause"));

        state.frame_count = 5;
        assert!(!row(&draw(&state), 5).contains("Pause"));
    }

    #[test]
    fn running_game_never_shows_pause_label() {
        let state = scripted_state(GameSettings::default());

        assert!(!row(&draw(&state), 5).contains("Pause"));
    }
}
