use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    figure::{figure_for_stage, FIGURE_HEIGHT},
    session::{Session, MAX_ATTEMPTS},
    store::Scoreboard,
};

const FIGURE_WIDTH: u16 = 14;
const BOARD_HEIGHT: u16 = FIGURE_HEIGHT + 2;

pub const MAIN_MENU: &str = "\
=== HANGMAN ===
1. New Game
2. Continue
3. Scoreboard
4. Exit";

pub const MODE_MENU: &str = "\
Choose a mode:
1. Single player
2. Multiplayer";

/// Everything the board needs to draw one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    pub pattern: String,
    pub guessed: &'a [char],
    pub remaining_attempts: u8,
    pub stage: usize,
}

impl<'a> From<&'a Session> for BoardView<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            pattern: session.reveal_pattern(),
            guessed: &session.guessed_letters,
            remaining_attempts: session.remaining_attempts,
            stage: session.figure_stage(),
        }
    }
}

/// Pattern with a space between letters so placeholders stay readable
pub fn spaced(pattern: &str) -> String {
    pattern.chars().join(" ")
}

impl Widget for &BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let attempts_style = if self.remaining_attempts <= 2 {
            bold_style.fg(Color::Red)
        } else {
            bold_style.fg(Color::Green)
        };

        let [figure_area, info_area] =
            Layout::horizontal([Constraint::Length(FIGURE_WIDTH), Constraint::Min(0)]).areas(area);

        Paragraph::new(figure_for_stage(self.stage)).render(figure_area, buf);

        let guessed = if self.guessed.is_empty() {
            "-".to_string()
        } else {
            self.guessed.iter().join(", ")
        };

        let info = vec![
            Line::from(vec![
                Span::raw("Word:     "),
                Span::styled(spaced(&self.pattern), bold_style),
            ]),
            Line::from(""),
            Line::from(vec![Span::raw("Guessed:  "), Span::raw(guessed)]),
            Line::from(vec![
                Span::raw("Attempts: "),
                Span::styled(
                    format!("{}/{}", self.remaining_attempts, MAX_ATTEMPTS),
                    attempts_style,
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Guess a letter, or type 'save' to save and quit",
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ];

        Paragraph::new(info)
            .block(Block::default().borders(Borders::LEFT))
            .render(info_area, buf);
    }
}

/// Render the board off-screen and return its rows as plain text.
pub fn render_board_lines(view: &BoardView<'_>, width: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width.max(FIGURE_WIDTH + 20), BOARD_HEIGHT);
    let mut buf = Buffer::empty(area);
    view.render(area, &mut buf);

    buf.content
        .chunks(area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .map(|row| row.trim_end().to_string())
        .collect()
}

/// Scoreboard as display lines, best players first
pub fn scoreboard_lines(scoreboard: &Scoreboard) -> Vec<String> {
    if scoreboard.is_empty() {
        return vec!["No wins recorded yet.".to_string()];
    }

    let ranked = scoreboard.ranked();
    let name_width = ranked
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    let mut lines = vec![
        "=== SCOREBOARD ===".to_string(),
        format!("{:<name_width$}  Wins", "Player"),
    ];
    lines.extend(
        ranked
            .iter()
            .map(|(name, wins)| format!("{name:<name_width$}  {wins}")),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn cat_with(guesses: &[&str]) -> Session {
        let mut session = Session::new("alice", "", "cat").unwrap();
        for g in guesses {
            let _ = session.guess(g);
        }
        session
    }

    #[test]
    fn test_board_view_from_session() {
        let session = cat_with(&["c", "x"]);
        let view = BoardView::from(&session);

        assert_eq!(view.pattern, "c__");
        assert_eq!(view.guessed, &['c', 'x']);
        assert_eq!(view.remaining_attempts, 5);
        assert_eq!(view.stage, 1);
    }

    #[test]
    fn test_board_renders_with_test_backend() {
        let session = cat_with(&["a", "z"]);
        let view = BoardView::from(&session);

        let backend = TestBackend::new(70, BOARD_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| f.render_widget(&view, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("_ a _"));
        assert!(content.contains("a, z"));
        assert!(content.contains("5/6"));
    }

    #[test]
    fn test_render_board_lines_contains_figure_and_word() {
        let session = cat_with(&["x", "y", "q", "w", "e", "r"]);
        let lines = render_board_lines(&BoardView::from(&session), 60);

        assert_eq!(lines.len(), BOARD_HEIGHT as usize);
        let text = lines.join("\n");
        assert!(text.contains("/|\\"));
        assert!(text.contains("_ _ _"));
        assert!(text.contains("0/6"));
        assert!(lines.iter().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn test_empty_guesses_show_dash() {
        let session = cat_with(&[]);
        let text = render_board_lines(&BoardView::from(&session), 60).join("\n");
        assert!(text.contains("Guessed:  -"));
    }

    #[test]
    fn test_spaced() {
        assert_eq!(spaced("c__"), "c _ _");
        assert_eq!(spaced(""), "");
    }

    #[test]
    fn test_scoreboard_lines() {
        let mut scoreboard = Scoreboard::default();
        assert_eq!(scoreboard_lines(&scoreboard), vec!["No wins recorded yet."]);

        scoreboard.increment("bob");
        scoreboard.increment("alice");
        scoreboard.increment("alice");

        let lines = scoreboard_lines(&scoreboard);
        assert_eq!(lines[0], "=== SCOREBOARD ===");
        assert!(lines[2].starts_with("alice"));
        assert!(lines[2].ends_with('2'));
        assert!(lines[3].starts_with("bob"));
    }
}
