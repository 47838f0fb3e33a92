use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::game::{Hangman, LetterStatus};
use super::language::{Difficulty, GameStatus, Language};
use crate::core::renderer::GameRenderer;

const KEYS_PER_ROW: usize = 9;

/// What one frame needs: the engine plus front-end flags.
pub struct HangmanScreen<'a> {
    pub game: &'a Hangman,
    pub sound_on: bool,
    pub pending: bool,
}

#[derive(Debug)]
pub struct HangmanRenderer;

impl GameRenderer<HangmanScreen<'_>> for HangmanRenderer {
    fn render(frame: &mut Frame, screen: &HangmanScreen<'_>) {
        let game = screen.game;
        let messages = game.messages();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Selectors
                Constraint::Min(10),   // Figure + word + keyboard
                Constraint::Length(4), // Status
                Constraint::Length(1), // Help
            ])
            .split(frame.area());

        let title = Paragraph::new(messages.title)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        frame.render_widget(Self::selectors(screen), chunks[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(16), Constraint::Min(0)])
            .split(chunks[2]);

        let figure = Paragraph::new(figure_lines(game.fail_count()).join("\n"))
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(figure_color(game.status())));
        frame.render_widget(figure, body[0]);

        let board = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(body[1]);

        let word = if game.is_loading() {
            String::new()
        } else {
            game.display_word()
        };
        let word_text = vec![
            Line::from(Span::styled(word, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(format!("{}: {}/{}", messages.fails, game.fail_count(), game.max_fails())),
        ];
        frame.render_widget(
            Paragraph::new(word_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            board[0],
        );

        frame.render_widget(
            Paragraph::new(keyboard_lines(&game.available_letters()))
                .block(Block::default().borders(Borders::ALL).title(messages.select_letter))
                .alignment(Alignment::Center),
            board[1],
        );

        let (status_text, status_color) = if screen.pending || game.is_loading() {
            (messages.loading.to_string(), Color::Gray)
        } else {
            match game.status() {
                GameStatus::Won => (format!("{}  [Enter] {}", messages.won, messages.restart), Color::Green),
                GameStatus::Lost => (format!("{}  [Enter] {}", messages.lost, messages.restart), Color::Red),
                GameStatus::Playing => (messages.select_letter.to_string(), Color::White),
            }
        };
        let mut status_lines = vec![Line::from(Span::styled(status_text, Style::default().fg(status_color)))];
        if let Some(notice) = game.notice() {
            status_lines.push(Line::from(Span::styled(notice, Style::default().fg(Color::Yellow))));
        }
        frame.render_widget(
            Paragraph::new(status_lines)
                .block(Block::default().borders(Borders::ALL))
                .wrap(Wrap { trim: true }),
            chunks[3],
        );

        frame.render_widget(
            Paragraph::new(messages.help)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            chunks[4],
        );
    }
}

impl HangmanRenderer {
    fn selectors<'a>(screen: &HangmanScreen<'a>) -> Paragraph<'a> {
        let game = screen.game;
        let messages = game.messages();
        let active = Style::default().bg(Color::Blue).fg(Color::White);

        let mut spans = Vec::new();
        for language in [Language::Es, Language::En] {
            let style = if language == game.language() { active } else { Style::default() };
            spans.push(Span::styled(format!(" {} ", language.as_str().to_uppercase()), style));
        }
        spans.push(Span::raw("   "));
        for difficulty in Difficulty::ALL {
            let style = if difficulty == game.difficulty() { active } else { Style::default() };
            spans.push(Span::styled(format!(" {} ", messages.difficulty.label(difficulty)), style));
        }
        spans.push(Span::raw("   "));
        let sound = if screen.sound_on { messages.sound_on } else { messages.sound_off };
        spans.push(Span::styled(sound, Style::default().fg(Color::Gray)));

        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title(messages.language_name))
            .alignment(Alignment::Center)
    }
}

/// Gallows drawing with one body part per fail: head, body, left arm,
/// right arm, left leg, right leg.
pub fn figure_lines(fails: usize) -> Vec<&'static str> {
    let head = if fails >= 1 { "  O   |" } else { "      |" };
    let torso = match fails {
        0 | 1 => "      |",
        2 => "  |   |",
        3 => " /|   |",
        _ => " /|\\  |",
    };
    let legs = match fails {
        0..=4 => "      |",
        5 => " /    |",
        _ => " / \\  |",
    };
    vec!["  +---+", "  |   |", head, torso, legs, "      |", "========="]
}

fn figure_color(status: GameStatus) -> Color {
    match status {
        GameStatus::Playing => Color::White,
        GameStatus::Won => Color::Green,
        GameStatus::Lost => Color::Red,
    }
}

fn keyboard_lines(letters: &[LetterStatus]) -> Vec<Line<'static>> {
    letters
        .chunks(KEYS_PER_ROW)
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .iter()
                .map(|key| {
                    let style = if key.correct {
                        Style::default().fg(Color::Black).bg(Color::Green)
                    } else if key.wrong {
                        Style::default().fg(Color::DarkGray).bg(Color::Red)
                    } else {
                        Style::default().add_modifier(Modifier::BOLD)
                    };
                    let label: String = key.letter.to_uppercase().collect();
                    Span::styled(format!(" {label} "), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
