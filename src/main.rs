use std::io::{self, Write};
use std::sync::Arc;

use chatwire::adapters::ReqwestHttpClient;
use chatwire::app::ChatController;
use chatwire::cli::{
    log_level, parse_args, parse_line, version_string, CliCommand, LineCommand, ReplyRenderer,
    USAGE,
};
use chatwire::config::ChatConfig;

use color_eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so they never interleave with the conversation on stdout.
fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let verbosity = match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("{}", version_string());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Chat { verbosity } => verbosity,
    };

    init_tracing(verbosity);

    let config = ChatConfig::from_env()?;
    let client = ReqwestHttpClient::from_config(&config)?;
    info!(endpoint = %config.endpoint, "Starting chatwire");

    let mut controller = ChatController::new(Arc::new(client), config);
    let mut updates = controller.subscribe();
    let mut renderer = ReplyRenderer::new();
    let mut was_busy = false;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_line(&line) {
                    LineCommand::Quit => break,
                    LineCommand::Empty => {
                        if !controller.is_busy() {
                            prompt()?;
                        }
                    }
                    LineCommand::Help => {
                        println!("{}", USAGE);
                        if !controller.is_busy() {
                            prompt()?;
                        }
                    }
                    LineCommand::Cancel => {
                        controller.cancel_active();
                    }
                    LineCommand::Send(text) => {
                        if let Err(e) = controller.begin(&text) {
                            eprintln!("{}", e.user_message());
                        }
                    }
                }
            }
            Some(event) = controller.next_event() => {
                controller.handle_event(event);
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if let Some(output) = renderer.update(&snapshot) {
                    print!("{}", output);
                    io::stdout().flush()?;
                }
                if was_busy && !snapshot.busy {
                    println!();
                    prompt()?;
                }
                was_busy = snapshot.busy;
            }
            _ = tokio::signal::ctrl_c() => {
                if controller.cancel_active().is_none() {
                    break;
                }
            }
        }
    }

    controller.shutdown();
    Ok(())
}
