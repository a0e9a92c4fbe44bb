use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::NotificationTime;
use crate::errors::StorageError;
use crate::storage::KeyValueStore;
use crate::utilities::{input, str_to_bool};

pub const PERMISSION_KEY: &str = "word_of_the_day:notification_permission";
pub const ALARMS_KEY: &str = "word_of_the_day:scheduled_alarms";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmPayload {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmContent {
    pub title: String,
    pub body: String,
    pub data: AlarmPayload,
}

/// An alarm firing at `hour:minute` every calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAlarm {
    pub hour: u32,
    pub minute: u32,
    pub repeats: bool,
    pub content: AlarmContent,
}

impl DailyAlarm {
    pub fn word_of_the_day(time: NotificationTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            repeats: true,
            content: AlarmContent {
                title: "Word of the Day".to_owned(),
                body: "Tap to learn a new word today!".to_owned(),
                data: AlarmPayload {
                    kind: "wordOfDay".to_owned(),
                },
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("permission prompt failed: {0}")]
    Prompt(#[from] io::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed notification record: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The host's notification service.
#[async_trait]
pub trait NotificationPlatform: Send + Sync {
    /// False where the host cannot register alarms at all.
    fn supports_alarms(&self) -> bool;

    async fn permission_status(&self) -> Result<PermissionStatus, PlatformError>;

    async fn request_permission(&self) -> Result<PermissionStatus, PlatformError>;

    async fn schedule_daily(&self, alarm: DailyAlarm) -> Result<(), PlatformError>;

    async fn cancel_all(&self) -> Result<(), PlatformError>;
}

/// A host without alarms. Everything succeeds and nothing happens.
pub struct InertPlatform;

#[async_trait]
impl NotificationPlatform for InertPlatform {
    fn supports_alarms(&self) -> bool {
        false
    }

    async fn permission_status(&self) -> Result<PermissionStatus, PlatformError> {
        Ok(PermissionStatus::Granted)
    }

    async fn request_permission(&self) -> Result<PermissionStatus, PlatformError> {
        Ok(PermissionStatus::Granted)
    }

    async fn schedule_daily(&self, _alarm: DailyAlarm) -> Result<(), PlatformError> {
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), PlatformError> {
        Ok(())
    }
}

/// Asks a question and returns the answer, `None` when no answer can come.
pub type Prompt = Box<dyn Fn(&str) -> io::Result<Option<String>> + Send + Sync>;

/// Terminal host: permission is asked on stdin and registered alarms are
/// kept in the local store.
pub struct LocalAlarms {
    store: Arc<dyn KeyValueStore>,
    prompt: Prompt,
}

impl LocalAlarms {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_prompt(store, Box::new(input))
    }

    pub fn with_prompt(store: Arc<dyn KeyValueStore>, prompt: Prompt) -> Self {
        Self { store, prompt }
    }

    pub async fn alarms(&self) -> Result<Vec<DailyAlarm>, PlatformError> {
        match self.store.get(ALARMS_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn store_alarms(&self, alarms: &[DailyAlarm]) -> Result<(), PlatformError> {
        let raw = serde_json::to_string(alarms)?;
        self.store.set(ALARMS_KEY, &raw).await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationPlatform for LocalAlarms {
    fn supports_alarms(&self) -> bool {
        true
    }

    async fn permission_status(&self) -> Result<PermissionStatus, PlatformError> {
        let status = match self.store.get(PERMISSION_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => PermissionStatus::Undetermined,
        };
        Ok(status)
    }

    async fn request_permission(&self) -> Result<PermissionStatus, PlatformError> {
        // a closed input never grants
        let allowed = match (self.prompt)("Allow a daily word reminder? (Y/n): ")? {
            Some(answer) => answer.trim().is_empty() || str_to_bool(answer).unwrap_or(false),
            None => false,
        };
        let status = if allowed {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        self.store
            .set(PERMISSION_KEY, &serde_json::to_string(&status)?)
            .await?;
        info!(?status, "notification permission answered");
        Ok(status)
    }

    async fn schedule_daily(&self, alarm: DailyAlarm) -> Result<(), PlatformError> {
        let mut alarms = self.alarms().await?;
        debug!(hour = alarm.hour, minute = alarm.minute, "registering alarm");
        alarms.push(alarm);
        self.store_alarms(&alarms).await
    }

    async fn cancel_all(&self) -> Result<(), PlatformError> {
        self.store_alarms(&[]).await
    }
}
