//! Command line viewer for the tool tracker list.
//!
//! `tooltracker [search] [brand]` loads every matching tool through the list
//! synchronization runtime and prints one line per card.

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use dotenvy::dotenv;

use tooltracker::domain::types::BrandName;
use tooltracker::dto::card::{CardAction, ToolCard};
use tooltracker::models::config::ClientConfig;
use tooltracker::repository::HttpRepository;
use tooltracker::sync::ListSync;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = env::args().skip(1);
    let search = args.next().unwrap_or_default();
    let brand = args.next().and_then(|name| BrandName::new(name).ok());

    let config = match ClientConfig::load(Some(Path::new("config/default"))) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let repo = match HttpRepository::new(&config.base_url, config.request_timeout()) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Error creating API client: {err}");
            return ExitCode::FAILURE;
        }
    };

    let sync = ListSync::spawn(Arc::new(repo), config.sync_settings());
    let snapshot = sync.load_all(&search, brand).await;
    sync.dispose().await;

    let Some(snapshot) = snapshot else {
        log::error!("List sync stopped before the list settled");
        return ExitCode::FAILURE;
    };

    for tool in &snapshot.tools {
        print_card(&ToolCard::from(tool));
    }
    println!("{} of {} tools", snapshot.tools.len(), snapshot.total_count);

    match snapshot.view.error {
        Some(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}

fn print_card(card: &ToolCard) {
    let brand = card.badge.as_ref().and_then(|b| b.brand).unwrap_or("-");
    let value = card.value_label.as_deref().unwrap_or("-");
    let action = match &card.action {
        CardAction::Return(href) => format!("return {href}"),
        CardAction::Lend(href) => format!("lend {href}"),
    };
    println!(
        "{:<32} {:<14} {:>10}  {}  [{action}]",
        card.title, brand, value, card.status
    );
}
