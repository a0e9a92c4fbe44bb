use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use dictionary::{Word, WordSource};
use tracing::{debug, error};

use crate::errors::AppResult;
use crate::storage::Storage;

/// Source of the device's local calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Where the current day's word stands.
#[derive(Debug, Clone, PartialEq)]
pub enum DailyWord {
    Unresolved,
    Resolved(Word),
    Failed(String),
}

/// Decides when a new word is fetched versus reused, and keeps an index of
/// the saved words for quick membership checks.
pub struct WordOfTheDay {
    storage: Storage,
    source: Arc<dyn WordSource>,
    clock: Arc<dyn Clock>,
    state: DailyWord,
    is_loading: bool,
    saved_words: Vec<Word>,
    saved_index: HashSet<String>,
}

impl WordOfTheDay {
    pub fn new(storage: Storage, source: Arc<dyn WordSource>) -> Self {
        Self::with_clock(storage, source, Arc::new(LocalClock))
    }

    pub fn with_clock(storage: Storage, source: Arc<dyn WordSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            source,
            clock,
            state: DailyWord::Unresolved,
            is_loading: false,
            saved_words: Vec::new(),
            saved_index: HashSet::new(),
        }
    }

    pub fn state(&self) -> &DailyWord {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn today_word(&self) -> Option<&Word> {
        match &self.state {
            DailyWord::Resolved(word) => Some(word),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            DailyWord::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Initial load: saved words first, then today's word.
    pub async fn load(&mut self) -> AppResult<Word> {
        self.refresh_saved_words().await;
        self.get_today_word().await
    }

    /// Returns today's word, fetching and storing a new one when the stored
    /// word is missing or from another day. Calling again after a failure retries.
    pub async fn get_today_word(&mut self) -> AppResult<Word> {
        self.state = DailyWord::Unresolved;
        self.is_loading = true;
        let result = self.resolve_today().await;
        self.is_loading = false;
        match result {
            Ok(word) => {
                self.state = DailyWord::Resolved(word.clone());
                Ok(word)
            }
            Err(err) => {
                error!(error = %err, "failed to get the word of the day");
                self.state = DailyWord::Failed(err.to_string());
                Err(err)
            }
        }
    }

    async fn resolve_today(&self) -> AppResult<Word> {
        let today = self.clock.today();
        if let Some(record) = self.storage.read_daily_record().await {
            if record.date == today {
                debug!(word = %record.word.word, "reusing today's word");
                return Ok(record.word);
            }
            debug!(stored = %record.date, %today, "stored word is stale");
        }
        let word = self.source.fetch_daily_word().await?;
        self.storage.write_daily_record(&word, today).await?;
        Ok(word)
    }
}

impl WordOfTheDay {
    pub fn saved_words(&self) -> &[Word] {
        &self.saved_words
    }

    pub fn saved_word(&self, key: &str) -> Option<&Word> {
        self.saved_words.iter().find(|saved| saved.word == key)
    }

    pub fn is_word_saved(&self, key: &str) -> bool {
        self.saved_index.contains(key)
    }

    pub async fn save_word(&mut self, word: &Word) -> AppResult<()> {
        self.storage.add_favorite(word).await?;
        self.refresh_saved_words().await;
        Ok(())
    }

    pub async fn remove_word(&mut self, key: &str) -> AppResult<()> {
        self.storage.remove_favorite(key).await?;
        self.refresh_saved_words().await;
        Ok(())
    }

    /// Rebuilds the in-memory list and index from the store.
    pub async fn refresh_saved_words(&mut self) {
        self.saved_words = self.storage.list_favorites().await;
        self.saved_index = self
            .saved_words
            .iter()
            .map(|saved| saved.word.clone())
            .collect();
    }
}
