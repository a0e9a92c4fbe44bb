//! Word of the day: fetches one dictionary word per local calendar day, keeps
//! a list of saved words and schedules a daily reminder.

pub mod commands;
pub mod config;
pub mod daily_word;
pub mod errors;
pub mod notifications;
pub mod storage;
pub mod utilities;

pub use daily_word::{DailyWord, WordOfTheDay};
pub use errors::{AppError, AppResult, StorageError};
