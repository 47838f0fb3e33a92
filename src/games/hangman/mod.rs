/// Hangman: the game engine plus its terminal front-end.
pub mod app;
pub mod game;
pub mod language;
pub mod messages;
pub mod renderer;
pub mod reveal;

pub use app::{HangmanApp, HangmanCommand};
pub use game::{Hangman, LetterStatus, Services, MAX_FAILS};
pub use language::{Alphabet, Difficulty, GameStatus, Language};
pub use messages::Messages;
pub use renderer::HangmanRenderer;
