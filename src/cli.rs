use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::games::hangman::{Difficulty, Language};
use crate::words::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "ahorcado")]
#[command(about = "🎩 Hangman in the terminal, in Spanish and English")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Language of the words and the interface
    #[arg(long, value_enum, default_value_t = Language::Es, env = "AHORCADO_LANG", global = true)]
    pub lang: Language,

    /// Difficulty to play (and remember) instead of the stored one
    #[arg(long, value_enum, env = "AHORCADO_DIFFICULTY", global = true)]
    pub difficulty: Option<Difficulty>,

    /// Base URL of the RAE dictionary API
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "AHORCADO_API_URL", global = true)]
    pub api_url: String,

    /// Give up on the dictionary after this many milliseconds
    #[arg(long, default_value_t = 3000, env = "AHORCADO_TIMEOUT_MS", global = true)]
    pub timeout_ms: u64,

    /// Never contact the dictionary; always use the built-in word lists
    #[arg(long, env = "AHORCADO_OFFLINE", global = true)]
    pub offline: bool,

    /// Seed for word selection and letter reveals
    #[arg(long, env = "AHORCADO_SEED", global = true)]
    pub seed: Option<u64>,

    /// Directory holding settings.json and the log file
    #[arg(long, env = "AHORCADO_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log file (defaults to ahorcado.log in the data directory)
    #[arg(long, env = "AHORCADO_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Start without sound
    #[arg(long, env = "AHORCADO_MUTE", global = true)]
    pub mute: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Play a game (default)
    Play,
    /// Fetch one word from the dictionary and print it
    Word {
        /// Word of the day instead of a random one
        #[arg(long)]
        daily: bool,
    },
    /// Print the built-in word list for --lang
    Words,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["ahorcado"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.lang, Language::Es);
        assert_eq!(cli.difficulty, None);
        assert_eq!(cli.timeout_ms, 3000);
        assert!(!cli.offline);
    }

    #[test]
    fn subcommands_accept_global_options() {
        let cli = Cli::try_parse_from(["ahorcado", "word", "--daily", "--timeout-ms", "500"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Word { daily: true }));
        assert_eq!(cli.timeout_ms, 500);

        let cli = Cli::try_parse_from(["ahorcado", "--lang", "en", "--difficulty", "hard", "play"]).unwrap();
        assert_eq!(cli.lang, Language::En);
        assert_eq!(cli.difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn rejects_unknown_language() {
        assert!(Cli::try_parse_from(["ahorcado", "--lang", "fr"]).is_err());
    }
}
