use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use dictionary_api::DICTIONARY_API_URL;
use random_word_api::RANDOM_WORD_API_URL;

mod dictionary;
mod dictionary_api;
mod random_word_api;

pub use dictionary::{PartOfSpeech, Phonetic, Word, WordDefinition, WordMeaning};

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("request failed: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("malformed response: {0}")]
    Deserialize(#[source] reqwest::Error),
    #[error("the {service} service answered with status {status}")]
    Status { service: &'static str, status: u16 },
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
    #[error("the {0} service returned nothing")]
    Empty(&'static str),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl DictionaryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DictionaryError::NotFound(_))
    }
}

#[derive(Debug, Clone, Error)]
#[error("No definition found for \"{word}\"")]
pub struct NotFoundError {
    word: String,
}

impl NotFoundError {
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}

/// Anything able to produce the word of the day.
#[async_trait]
pub trait WordSource: Send + Sync {
    async fn fetch_daily_word(&self) -> Result<Word, DictionaryError>;
}

/// Base URLs of the two remote services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub random_word: String,
    pub dictionary: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            random_word: RANDOM_WORD_API_URL.to_owned(),
            dictionary: DICTIONARY_API_URL.to_owned(),
        }
    }
}

pub struct Dictionary {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::with_endpoints(Endpoints::default())
    }

    pub fn with_endpoints(endpoints: Endpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }

    pub async fn get_definition(&self, word: &str) -> Result<Word, DictionaryError> {
        dictionary_api::get_definition(&self.client, &self.endpoints.dictionary, word).await
    }

    pub async fn get_random_words(
        &self,
        max: usize,
        length: Option<usize>,
    ) -> Result<Vec<String>, DictionaryError> {
        random_word_api::get_random_words(&self.client, &self.endpoints.random_word, max, length)
            .await
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WordSource for Dictionary {
    /// One random word, then its definition. A failure at either step aborts.
    async fn fetch_daily_word(&self) -> Result<Word, DictionaryError> {
        let word = self
            .get_random_words(1, None)
            .await?
            .into_iter()
            .next()
            .map(|word| word.trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .ok_or(DictionaryError::Empty("random word"))?;
        let mut entry = self.get_definition(&word).await.map_err(|error| {
            warn!(%word, %error, "could not define the random word");
            error
        })?;
        entry.fetch_date = Some(Utc::now());
        info!(word = %entry.word, "fetched a new word of the day");
        Ok(entry)
    }
}
