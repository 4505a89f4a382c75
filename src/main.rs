use std::io::{self, BufRead};

use stackit::AppState;
use stackit::cli::{Reply, Shell};
use stackit::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stackit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Configuration loaded ({}, {:?} votes, max {} tags)",
        config.app_name,
        config.vote_mode,
        config.max_tags
    );

    let state = AppState::new(config)?;
    tracing::info!("Store ready; type `help` for commands");

    let mut shell = Shell::new(state);
    println!("{}", serde_json::to_string_pretty(&shell.view()?)?);

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match shell.execute_line(&line) {
            Reply::View(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Reply::Text(text) => println!("{}", text),
            Reply::Quit => break,
        }
    }

    tracing::info!("Bye");
    Ok(())
}
