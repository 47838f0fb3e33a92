/// Secret-word supply: the remote dictionary first, the built-in lists as fallback.
pub mod local;
pub mod remote;

use async_trait::async_trait;

use crate::error::NetworkError;
use crate::games::hangman::Language;
use crate::random::RandomSource;

pub use local::{LocalWords, FALLBACK_WORD};
pub use remote::{RaeClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

#[async_trait]
pub trait WordSource: Send + Sync {
    /// One upper-cased word from the remote dictionary.
    async fn fetch_remote_word(&self) -> Result<String, NetworkError>;

    /// One upper-cased word from the local list for `language`.
    fn pick_local_word(&self, language: Language, rng: &mut dyn RandomSource) -> String;
}

/// The production word source. Without a client every remote fetch fails with
/// [`NetworkError::Offline`] and the engine falls back to the local lists.
pub struct Dictionary {
    remote: Option<RaeClient>,
    local: LocalWords,
}

impl Dictionary {
    pub fn new(remote: RaeClient, local: LocalWords) -> Self {
        Self { remote: Some(remote), local }
    }

    pub fn offline(local: LocalWords) -> Self {
        Self { remote: None, local }
    }
}

#[async_trait]
impl WordSource for Dictionary {
    async fn fetch_remote_word(&self) -> Result<String, NetworkError> {
        match &self.remote {
            Some(client) => client.random_word().await,
            None => Err(NetworkError::Offline),
        }
    }

    fn pick_local_word(&self, language: Language, rng: &mut dyn RandomSource) -> String {
        self.local.pick(language, rng)
    }
}
