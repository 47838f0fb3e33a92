pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod games;
pub mod random;
pub mod services;
pub mod words;

// Re-export for convenience
pub use crate::core::game::{Context, Game};
pub use crate::error::{NetworkError, StorageError};
pub use crate::games::hangman::{Difficulty, GameStatus, Hangman, Language};
