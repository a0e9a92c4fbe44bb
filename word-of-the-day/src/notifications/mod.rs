//! Daily reminder scheduling.
//!
//! The scheduler owns the notification settings record and keeps exactly one
//! repeating alarm registered with the host while reminders are enabled.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::errors::{AppError, AppResult};
use crate::storage::Storage;

mod platform;
mod settings;

pub use platform::{
    DailyAlarm, InertPlatform, LocalAlarms, NotificationPlatform, PermissionStatus, PlatformError,
};
pub use settings::{InvalidTime, NotificationSettings, NotificationTime};

pub struct NotificationScheduler {
    storage: Storage,
    platform: Arc<dyn NotificationPlatform>,
}

impl NotificationScheduler {
    pub fn new(storage: Storage, platform: Arc<dyn NotificationPlatform>) -> Self {
        Self { storage, platform }
    }

    pub async fn settings(&self) -> NotificationSettings {
        self.storage.read_settings().await
    }

    /// Re-registers the reminder from stored settings at start-up.
    pub async fn initialize(&self) {
        if !self.platform.supports_alarms() {
            debug!("host has no alarms, reminders are inert");
            return;
        }
        self.reschedule().await;
    }

    pub async fn reschedule(&self) {
        let settings = self.storage.read_settings().await;
        self.schedule_daily(&settings).await;
    }

    /// Replaces any registered reminder with one for `settings`. Failures are
    /// logged, never returned.
    pub async fn schedule_daily(&self, settings: &NotificationSettings) {
        if !self.platform.supports_alarms() {
            return;
        }
        if let Err(err) = self.try_schedule_daily(settings).await {
            error!(error = %err, "failed to schedule the daily reminder");
        }
    }

    async fn try_schedule_daily(&self, settings: &NotificationSettings) -> Result<(), PlatformError> {
        let status = self.request_permission(false).await;
        if status != PermissionStatus::Granted {
            debug!(?status, "not scheduling without permission");
            return Ok(());
        }
        let Some(time) = settings.trigger_time() else {
            debug!(?settings, "reminder disabled or has no time");
            return Ok(());
        };
        self.platform.cancel_all().await?;
        self.platform
            .schedule_daily(DailyAlarm::word_of_the_day(time))
            .await?;
        info!(%time, "scheduled the daily reminder");
        Ok(())
    }

    /// Resolves the permission status, prompting the user when asked to.
    /// Stored settings are switched off whenever permission is missing.
    pub async fn request_permission(&self, prompt: bool) -> PermissionStatus {
        if !self.platform.supports_alarms() {
            return PermissionStatus::Granted;
        }
        let current = self
            .platform
            .permission_status()
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, "could not read notification permission");
                PermissionStatus::Undetermined
            });
        let status = if current != PermissionStatus::Granted && prompt {
            self.platform
                .request_permission()
                .await
                .unwrap_or_else(|err| {
                    warn!(error = %err, "notification permission request failed");
                    current
                })
        } else {
            current
        };

        if status != PermissionStatus::Granted {
            let settings = self.storage.read_settings().await;
            if settings.enabled {
                let corrected = NotificationSettings {
                    enabled: false,
                    ..settings
                };
                match self.storage.write_settings(&corrected).await {
                    Ok(()) => info!(?status, "reminders disabled, permission is missing"),
                    Err(err) => error!(error = %err, "could not disable reminders"),
                }
            }
        }
        status
    }

    /// Stores a new reminder time, switching reminders on.
    pub async fn save_notification_time(&self, time: NotificationTime) -> AppResult<()> {
        let settings = NotificationSettings {
            enabled: true,
            time: Some(time),
        };
        self.storage.write_settings(&settings).await?;
        self.schedule_daily(&settings).await;
        Ok(())
    }

    pub async fn toggle_enabled(&self, enabled: bool) -> AppResult<()> {
        if enabled && self.request_permission(true).await != PermissionStatus::Granted {
            return Err(AppError::PermissionDenied);
        }
        let settings = NotificationSettings {
            enabled,
            ..self.storage.read_settings().await
        };
        self.storage.write_settings(&settings).await?;
        if enabled {
            self.schedule_daily(&settings).await;
        } else if self.platform.supports_alarms() {
            if let Err(err) = self.platform.cancel_all().await {
                error!(error = %err, "failed to cancel reminders");
            }
        }
        Ok(())
    }
}
