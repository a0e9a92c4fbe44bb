//! Handlers behind the terminal commands. Each prints its outcome; a failure
//! is reported to the user and never ends the session.

use dictionary::Word;
use tracing::warn;

use crate::notifications::{LocalAlarms, NotificationScheduler};
use crate::utilities::{parse_time, str_to_bool};
use crate::{AppError, DailyWord, WordOfTheDay};

pub async fn show_today(words: &mut WordOfTheDay) {
    // failures are kept in the state and reported below
    let _ = words.load().await;
    match words.state() {
        DailyWord::Resolved(word) => {
            print_definition(word);
            if words.is_word_saved(&word.word) {
                println!("(saved)");
            }
        }
        DailyWord::Failed(message) => {
            println!("{message}");
            println!("Type 'refresh' to try again.");
        }
        DailyWord::Unresolved => {}
    }
}

pub async fn save_today(words: &mut WordOfTheDay) {
    let Some(word) = words.today_word().cloned() else {
        println!("There is no word for today yet, try 'today' first.");
        return;
    };
    if words.is_word_saved(&word.word) {
        println!("'{}' is already saved.", word.word);
        return;
    }
    match words.save_word(&word).await {
        Ok(()) => println!("Saved '{}'.", word.word),
        Err(error) => eprintln!("Failed to save the word: {error}"),
    }
}

pub async fn remove_word(words: &mut WordOfTheDay, word: &str) {
    if word.is_empty() {
        println!("Usage: remove <word>");
        return;
    }
    if !words.is_word_saved(word) {
        println!("This word is not saved.");
        return;
    }
    match words.remove_word(word).await {
        Ok(()) => println!("Removed the word successfully."),
        Err(error) => eprintln!("Failed to remove the word: {error}"),
    }
}

pub fn list_saved(words: &WordOfTheDay) {
    let saved = words.saved_words();
    if saved.is_empty() {
        println!("You have not saved any words yet.");
        return;
    }
    for (index, word) in saved.iter().enumerate() {
        let summary = word
            .meanings
            .first()
            .and_then(|meaning| meaning.definitions.first())
            .map(|definition| &definition.definition[..])
            .unwrap_or("");
        println!("[{}] {}: {}", index + 1, word.word, summary);
    }
}

pub fn show_saved(words: &WordOfTheDay, word: &str) {
    match words.saved_word(word) {
        Some(saved) => print_definition(saved),
        None => println!("'{word}' is not among your saved words."),
    }
}

pub async fn toggle_notifications(scheduler: &NotificationScheduler, argument: String) {
    let Some(enabled) = str_to_bool(argument) else {
        println!("Usage: notify on|off");
        return;
    };
    match scheduler.toggle_enabled(enabled).await {
        Ok(()) if enabled => match scheduler.settings().await.time {
            Some(time) => println!("Daily reminder enabled at {time}."),
            None => println!("Reminders enabled. Pick a time with 'time HH:MM'."),
        },
        Ok(()) => println!("Daily reminder disabled."),
        Err(AppError::PermissionDenied) => {
            println!("Notifications are not allowed, the reminder stays off.");
        }
        Err(error) => eprintln!("Failed to change the reminder: {error}"),
    }
}

pub async fn set_notification_time(scheduler: &NotificationScheduler, argument: &str) {
    let time = match parse_time(argument) {
        Ok(time) => time,
        Err(error) => {
            println!("{error}");
            return;
        }
    };
    if let Err(error) = scheduler.save_notification_time(time).await {
        eprintln!("Failed to save the reminder time: {error}");
        return;
    }
    if scheduler.settings().await.enabled {
        println!("Daily reminder set for {time}.");
    } else {
        println!("Saved {time}, but notifications are not allowed. Use 'notify on' to allow them.");
    }
}

pub async fn print_settings(scheduler: &NotificationScheduler) {
    let settings = scheduler.settings().await;
    let permission = scheduler.request_permission(false).await;
    println!(
        "Reminder: {}",
        if settings.enabled { "on" } else { "off" }
    );
    match settings.time {
        Some(time) => println!("Time: {time}"),
        None => println!("Time: not set"),
    }
    println!("Permission: {permission:?}");
}

pub async fn print_alarms(alarms: Option<&LocalAlarms>) {
    let Some(alarms) = alarms else {
        println!("Notifications are turned off for this installation.");
        return;
    };
    let registered = match alarms.alarms().await {
        Ok(registered) => registered,
        Err(error) => {
            warn!(%error, "could not read the registered alarms");
            eprintln!("Failed to read the scheduled reminder: {error}");
            return;
        }
    };
    if registered.is_empty() {
        println!("No reminder is scheduled.");
    }
    for alarm in registered {
        println!(
            "{:02}:{:02} every day - {}: {}",
            alarm.hour, alarm.minute, alarm.content.title, alarm.content.body
        );
    }
}

pub fn print_help() {
    println!("today            show the word of the day");
    println!("save             save today's word");
    println!("remove <word>    remove a saved word");
    println!("saved            list saved words");
    println!("show <word>      show a saved word's definition");
    println!("notify on|off    turn the daily reminder on or off");
    println!("time HH:MM       set the daily reminder time");
    println!("settings         show reminder settings");
    println!("alarms           show the scheduled reminder");
    println!("quit             leave");
}

pub fn print_definition(word: &Word) {
    println!("Word of the day: '{}'", word.word);
    if let Some(pronunciation) = word.pronunciation() {
        println!("    {pronunciation}");
    }
    if let Some(audio) = word.audio() {
        println!("    audio: {audio}");
    }
    for meaning in &word.meanings {
        println!("    {}:", meaning.part_of_speech);
        for definition in &meaning.definitions {
            println!("        {}", definition.definition);
            if let Some(example) = &definition.example {
                println!("          example: {example}");
            }
            if !definition.synonyms.is_empty() {
                println!("          synonyms: {}", definition.synonyms.join(", "));
            }
            if !definition.antonyms.is_empty() {
                println!("          antonyms: {}", definition.antonyms.join(", "));
            }
        }
        if !meaning.synonyms.is_empty() {
            println!("      synonyms: {}", meaning.synonyms.join(", "));
        }
        if !meaning.antonyms.is_empty() {
            println!("      antonyms: {}", meaning.antonyms.join(", "));
        }
    }
    if let Some(origin) = &word.origin {
        println!("    origin: {origin}");
    }
}
