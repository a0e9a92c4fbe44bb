use std::sync::Arc;

use dictionary::Dictionary;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use word_of_the_day::commands::*;
use word_of_the_day::config::{Config, NotificationMode};
use word_of_the_day::notifications::{
    InertPlatform, LocalAlarms, NotificationPlatform, NotificationScheduler,
};
use word_of_the_day::storage::{KeyValueStore, SqliteStore, Storage};
use word_of_the_day::utilities::input;
use word_of_the_day::WordOfTheDay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::initialize(&config.database_url).await?);
    info!(database = %config.database_url, "opened local store");
    let storage = Storage::new(store.clone());

    let local_alarms = match config.notifications {
        NotificationMode::Local => Some(Arc::new(LocalAlarms::new(store.clone()))),
        NotificationMode::Off => None,
    };
    let platform: Arc<dyn NotificationPlatform> = match &local_alarms {
        Some(alarms) => alarms.clone(),
        None => Arc::new(InertPlatform),
    };
    let scheduler = NotificationScheduler::new(storage.clone(), platform);
    scheduler.initialize().await;

    let dict = Dictionary::with_endpoints(config.endpoints.clone());
    let mut words = WordOfTheDay::new(storage, Arc::new(dict));
    show_today(&mut words).await;

    loop {
        let Some(line) = input(">> ")? else {
            // stdin closed
            println!();
            break;
        };
        let line = line.trim();
        let mut command_parts = line.split_ascii_whitespace();
        if let Some(command) = command_parts.next() {
            let argument = command_parts.collect::<Vec<&str>>().join(" ");
            match command {
                "exit" | "leave" | "quit" | "e" | "q" | "l" => {
                    break;
                }
                "today" | "word" | "refresh" => {
                    show_today(&mut words).await;
                }
                "save" => {
                    save_today(&mut words).await;
                }
                "remove" | "unsave" => {
                    remove_word(&mut words, argument.trim()).await;
                }
                "saved" | "list" => {
                    list_saved(&words);
                }
                "show" => {
                    show_saved(&words, argument.trim());
                }
                "notify" => {
                    toggle_notifications(&scheduler, argument).await;
                }
                "time" => {
                    set_notification_time(&scheduler, &argument).await;
                }
                "settings" => {
                    print_settings(&scheduler).await;
                }
                "alarms" => {
                    print_alarms(local_alarms.as_deref()).await;
                }
                "help" => {
                    print_help();
                }
                _ => {
                    println!("Unknown command {command}. Type 'help' for a list of commands.");
                }
            }
        }
    }
    Ok(())
}
