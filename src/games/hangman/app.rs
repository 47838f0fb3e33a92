use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::game::Hangman;
use super::language::{Difficulty, GameStatus, Language};
use super::renderer::{HangmanRenderer, HangmanScreen};
use crate::core::game::{Context, Game};
use crate::core::renderer::GameRenderer;
use crate::services::audio::{AudioNotifier, AudioService, SoundEffect};

/// Work that has to be awaited by the engine loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HangmanCommand {
    Restart,
    ChangeLanguage(Language),
    ChangeDifficulty(Difficulty),
}

/// Terminal front-end: maps keys onto the engine and draws it.
pub struct HangmanApp {
    game: Hangman,
    audio: Arc<AudioService>,
    pending: bool,
}

impl HangmanApp {
    pub fn new(game: Hangman, audio: Arc<AudioService>) -> Self {
        Self {
            game,
            audio,
            pending: false,
        }
    }

    pub fn game(&self) -> &Hangman {
        &self.game
    }

    /// True between queuing a command and the engine finishing it.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn request(&mut self, command: HangmanCommand, ctx: &Context<HangmanCommand>) {
        self.pending = true;
        ctx.send_command(command);
    }
}

#[async_trait]
impl Game for HangmanApp {
    type Command = HangmanCommand;

    fn on_start(&mut self, ctx: &Context<Self::Command>) {
        self.request(HangmanCommand::Restart, ctx);
    }

    fn tick_rate(&self) -> Option<Duration> {
        Some(Duration::from_millis(250))
    }

    fn on_tick(&mut self, _dt: u32, _ctx: &Context<Self::Command>) {
        self.game.clear_expired_notice();
    }

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context<Self::Command>) {
        if self.pending {
            return;
        }

        match event.code {
            KeyCode::F(2) => {
                self.audio.play(SoundEffect::Click);
                let language = self.game.language().toggled();
                self.request(HangmanCommand::ChangeLanguage(language), ctx);
            }
            KeyCode::F(3) => {
                self.audio.play(SoundEffect::Click);
                let difficulty = self.game.difficulty().next();
                self.request(HangmanCommand::ChangeDifficulty(difficulty), ctx);
            }
            KeyCode::F(4) => {
                // Only the switch to "on" is audible.
                if self.audio.toggle() {
                    self.audio.play(SoundEffect::Click);
                }
            }
            KeyCode::F(5) => self.request(HangmanCommand::Restart, ctx),
            KeyCode::Enter if self.game.status() != GameStatus::Playing => {
                self.request(HangmanCommand::Restart, ctx);
            }
            KeyCode::Char(c) if !event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                let mut buf = [0u8; 4];
                self.game.guess_letter(c.encode_utf8(&mut buf));
            }
            _ => {}
        }
    }

    async fn handle_command(&mut self, command: Self::Command) {
        match command {
            HangmanCommand::Restart => self.game.restart_game().await,
            HangmanCommand::ChangeLanguage(language) => self.game.change_language(language).await,
            HangmanCommand::ChangeDifficulty(difficulty) => self.game.change_difficulty(difficulty).await,
        }
        self.pending = false;
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        let screen = HangmanScreen {
            game: &self.game,
            sound_on: self.audio.is_enabled(),
            pending: self.pending,
        };
        HangmanRenderer::render(frame, &screen);
    }
}
