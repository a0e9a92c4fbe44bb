use std::sync::Arc;

use chrono::NaiveDate;
use dictionary::Word;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::StorageError;
use crate::notifications::NotificationSettings;

mod kv;
#[cfg(test)]
mod memory;

pub use kv::{KeyValueStore, SqliteStore};
#[cfg(test)]
pub use memory::MemoryStore;

pub const DAILY_WORD_KEY: &str = "word_of_the_day:current";
pub const SAVED_WORDS_KEY: &str = "word_of_the_day:saved_words";
pub const NOTIFICATION_SETTINGS_KEY: &str = "word_of_the_day:notification_settings";

/// The word fetched for a given local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWordRecord {
    #[serde(flatten)]
    pub word: Word,
    pub date: NaiveDate,
}

/// Typed access to the daily word slot, the saved words and the notification
/// settings. Reads fail soft, writes fail hard.
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(key, %error, "could not read record");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(key, %error, "discarding unreadable record");
                None
            }
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw).await
    }
}

impl Storage {
    pub async fn read_daily_record(&self) -> Option<DailyWordRecord> {
        self.read(DAILY_WORD_KEY).await
    }

    pub async fn write_daily_record(&self, word: &Word, date: NaiveDate) -> Result<(), StorageError> {
        let record = DailyWordRecord {
            word: word.clone(),
            date,
        };
        self.write(DAILY_WORD_KEY, &record).await?;
        debug!(word = %word.word, %date, "stored the daily word");
        Ok(())
    }
}

impl Storage {
    pub async fn list_favorites(&self) -> Vec<Word> {
        self.read(SAVED_WORDS_KEY).await.unwrap_or_default()
    }

    /// Appends `word` unless a word with the same key is already saved.
    pub async fn add_favorite(&self, word: &Word) -> Result<(), StorageError> {
        let mut favorites = self.list_favorites().await;
        if favorites.iter().any(|saved| saved.word == word.word) {
            debug!(word = %word.word, "word already saved");
            return Ok(());
        }
        favorites.push(word.clone());
        self.write(SAVED_WORDS_KEY, &favorites).await
    }

    /// Removes every saved word matching `key`. The list is rewritten even if nothing matched.
    pub async fn remove_favorite(&self, key: &str) -> Result<(), StorageError> {
        let mut favorites = self.list_favorites().await;
        favorites.retain(|saved| saved.word != key);
        self.write(SAVED_WORDS_KEY, &favorites).await
    }

    pub async fn is_favorite(&self, key: &str) -> bool {
        self.list_favorites()
            .await
            .iter()
            .any(|saved| saved.word == key)
    }
}

impl Storage {
    pub async fn read_settings(&self) -> NotificationSettings {
        self.read(NOTIFICATION_SETTINGS_KEY)
            .await
            .unwrap_or_default()
    }

    pub async fn write_settings(&self, settings: &NotificationSettings) -> Result<(), StorageError> {
        self.write(NOTIFICATION_SETTINGS_KEY, settings).await
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use dictionary::{PartOfSpeech, Word, WordDefinition, WordMeaning};

    pub fn word(text: &str, definition: &str) -> Word {
        Word {
            word: text.to_owned(),
            phonetic: None,
            phonetics: Vec::new(),
            origin: None,
            meanings: vec![WordMeaning {
                part_of_speech: PartOfSpeech::Adjective,
                definitions: vec![WordDefinition {
                    definition: definition.to_owned(),
                    example: None,
                    synonyms: Vec::new(),
                    antonyms: Vec::new(),
                }],
                synonyms: Vec::new(),
                antonyms: Vec::new(),
            }],
            fetch_date: None,
        }
    }
}
