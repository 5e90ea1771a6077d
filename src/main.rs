use pinforge::logger::{self, LoggerConfig};
use pinforge::{Command, Config, GenerationController, HttpBackend, TerminalView, View};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = Config::from_env();
    logger::init_with_config(LoggerConfig::from_config(&config))?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }
    logger::log_config_info(&config);

    let backend = HttpBackend::new(config.server.clone())?;
    let view = Arc::new(TerminalView::new(config.download.directory.clone()));
    let mut controller =
        GenerationController::new(backend, Arc::clone(&view), config.download.clone());

    print_help();
    view.focus_prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match view.parse_command(&line) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Noop => {}
            Command::Invalid(message) => view.alert(&message),
            Command::Event(event) => {
                let outcome = controller.handle(event).await;
                log::debug!("Event outcome: {:?}", outcome);
            }
        }
        view.focus_prompt();
    }

    log::info!("👋 Bye");
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  <prompt> | generate <prompt>   generate images");
    println!("  select <n>                     toggle image n");
    println!("  download                       download and pin the selection");
    println!("  retry                          start over after a pending result");
    println!("  help | quit");
}
