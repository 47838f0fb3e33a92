use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::language::{lowercase, Alphabet, Difficulty, GameStatus, Language};
use super::messages::Messages;
use super::reveal;
use crate::random::RandomSource;
use crate::services::audio::{AudioNotifier, SoundEffect};
use crate::services::storage::KeyValueStore;
use crate::words::{WordSource, FALLBACK_WORD};

pub const MAX_FAILS: usize = 6;
pub const DIFFICULTY_STORAGE_KEY: &str = "hangman-difficulty";
/// How long the "using local words" notice stays up.
pub const NOTICE_TTL: Duration = Duration::from_secs(2);
/// Gap between the last letter cue and the win/lose cue.
pub const END_CUE_DELAY: Duration = Duration::from_millis(300);

/// Everything the engine talks to.
pub struct Services {
    pub words: Arc<dyn WordSource>,
    pub audio: Arc<dyn AudioNotifier>,
    pub store: Arc<dyn KeyValueStore>,
    pub rng: Box<dyn RandomSource>,
}

/// One key of the on-screen keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LetterStatus {
    pub letter: char,
    pub guessed: bool,
    pub correct: bool,
    pub wrong: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Notice {
    text: &'static str,
    expires_at: Instant,
}

/// Single-player hangman state machine.
///
/// A game runs `Playing -> Won | Lost`. `initialize` (and the language,
/// difficulty and restart operations built on it) throws the current game
/// away and starts a new one; nothing else leaves a terminal status.
pub struct Hangman {
    language: Language,
    difficulty: Difficulty,
    secret_word: String,
    guessed: BTreeSet<char>,
    wrong: BTreeSet<char>,
    status: GameStatus,
    loading: bool,
    notice: Option<Notice>,
    words: Arc<dyn WordSource>,
    audio: Arc<dyn AudioNotifier>,
    store: Arc<dyn KeyValueStore>,
    rng: Box<dyn RandomSource>,
}

impl Hangman {
    /// Builds an engine waiting for its first `initialize`. The difficulty
    /// comes from the store.
    pub fn new(language: Language, services: Services) -> Self {
        let difficulty = load_difficulty(services.store.as_ref());
        Self {
            language,
            difficulty,
            secret_word: String::new(),
            guessed: BTreeSet::new(),
            wrong: BTreeSet::new(),
            status: GameStatus::Playing,
            loading: true,
            notice: None,
            words: services.words,
            audio: services.audio,
            store: services.store,
            rng: services.rng,
        }
    }

    /// `new` followed by the first `initialize`.
    pub async fn start(language: Language, services: Services) -> Self {
        let mut game = Self::new(language, services);
        game.initialize().await;
        game
    }

    /// Starts a fresh game with the current language and difficulty.
    ///
    /// Never fails: a remote dictionary failure falls back to the local word
    /// list and raises a short-lived notice.
    pub async fn initialize(&mut self) {
        self.loading = true;
        self.notice = None;
        self.guessed.clear();
        self.wrong.clear();
        self.status = GameStatus::Playing;

        let word = match self.words.fetch_remote_word().await {
            Ok(word) => word,
            Err(e) => {
                warn!(error = %e, language = %self.language, "remote dictionary unavailable, using local words");
                self.notice = Some(Notice {
                    text: Messages::new(self.language, "").local_dictionary,
                    expires_at: Instant::now() + NOTICE_TTL,
                });
                self.words.pick_local_word(self.language, self.rng.as_mut())
            }
        };

        let word = word.trim().to_uppercase();
        self.secret_word = if word.is_empty() { FALLBACK_WORD.to_string() } else { word };
        self.loading = false;

        let revealed = reveal::initial_letters(&self.secret_word, self.difficulty, self.rng.as_mut());
        self.guessed.extend(revealed);

        info!(
            language = %self.language,
            difficulty = %self.difficulty,
            letters = self.secret_word.chars().count(),
            revealed = self.guessed.len(),
            "new game"
        );
    }

    /// Applies one letter guess. Returns whether the game changed.
    ///
    /// Ignored while loading, after the game has ended, for anything other
    /// than a single letter of the active alphabet, and for repeats.
    pub fn guess_letter(&mut self, input: &str) -> bool {
        if self.status != GameStatus::Playing || self.loading {
            return false;
        }

        let mut chars = input.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) => lowercase(c),
            _ => return false,
        };
        if !self.alphabet().contains(letter) {
            return false;
        }
        if self.guessed.contains(&letter) || self.wrong.contains(&letter) {
            return false;
        }

        if self.secret_word.chars().map(lowercase).any(|c| c == letter) {
            self.guessed.insert(letter);
            self.audio.play(SoundEffect::Correct);
        } else {
            self.wrong.insert(letter);
            self.audio.play(SoundEffect::Wrong);
        }
        debug!(%letter, fails = self.wrong.len(), "letter guessed");

        if self.is_word_complete() {
            self.status = GameStatus::Won;
            info!(fails = self.wrong.len(), "game won");
            self.schedule_cue(SoundEffect::Win);
        } else if self.wrong.len() >= MAX_FAILS {
            self.status = GameStatus::Lost;
            info!(word = %self.secret_word, "game lost");
            self.schedule_cue(SoundEffect::Lose);
        }
        true
    }

    pub async fn change_language(&mut self, language: Language) {
        self.language = language;
        self.initialize().await;
    }

    /// Switches difficulty, remembers it for later sessions and starts over.
    pub async fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        if let Err(e) = self.store.set(DIFFICULTY_STORAGE_KEY, difficulty.as_str()) {
            warn!(error = %e, %difficulty, "failed to save difficulty");
        }
        self.initialize().await;
    }

    pub async fn restart_game(&mut self) {
        self.initialize().await;
    }

    /// Drops the notice once it has expired.
    pub fn clear_expired_notice(&mut self) {
        if matches!(self.notice, Some(n) if Instant::now() >= n.expires_at) {
            self.notice = None;
        }
    }

    fn schedule_cue(&self, effect: SoundEffect) {
        let audio = Arc::clone(&self.audio);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(END_CUE_DELAY).await;
                    audio.play(effect);
                });
            }
            Err(_) => audio.play(effect),
        }
    }

    fn is_word_complete(&self) -> bool {
        !self.secret_word.is_empty()
            && self.secret_word.chars().map(lowercase).all(|c| self.guessed.contains(&c))
    }

    fn alphabet(&self) -> Alphabet {
        Alphabet::for_language(self.language)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn fail_count(&self) -> usize {
        self.wrong.len()
    }

    pub fn max_fails(&self) -> usize {
        MAX_FAILS
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn wrong_letters(&self) -> &BTreeSet<char> {
        &self.wrong
    }

    /// The transient local-dictionary notice, until it expires.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
            .filter(|n| Instant::now() < n.expires_at)
            .map(|n| n.text)
    }

    /// The answer, but only once the game is over.
    pub fn secret_word(&self) -> Option<&str> {
        match self.status {
            GameStatus::Playing => None,
            GameStatus::Won | GameStatus::Lost => Some(&self.secret_word),
        }
    }

    /// The word with unguessed characters replaced by `_`, space separated.
    pub fn display_word(&self) -> String {
        self.secret_word
            .chars()
            .map(|c| if self.guessed.contains(&lowercase(c)) { c } else { '_' })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn available_letters(&self) -> Vec<LetterStatus> {
        self.alphabet()
            .letters()
            .iter()
            .map(|&letter| {
                let correct = self.guessed.contains(&letter);
                let wrong = self.wrong.contains(&letter);
                LetterStatus {
                    letter,
                    guessed: correct || wrong,
                    correct,
                    wrong,
                }
            })
            .collect()
    }

    pub fn messages(&self) -> Messages {
        Messages::new(self.language, self.secret_word().unwrap_or_default())
    }
}

/// Stored difficulty, or medium when absent, unreadable or unknown.
pub fn load_difficulty(store: &dyn KeyValueStore) -> Difficulty {
    match store.get(DIFFICULTY_STORAGE_KEY) {
        Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
            warn!(%value, "ignoring unknown stored difficulty");
            Difficulty::default()
        }),
        Ok(None) => Difficulty::default(),
        Err(e) => {
            warn!(error = %e, "failed to load difficulty");
            Difficulty::default()
        }
    }
}
