use coze_chat::cli::{parse_args, run_chat, version_string, CliCommand, USAGE};
use coze_chat::client::ChatClient;
use coze_chat::config::CozeConfig;
use coze_chat::models::ChatStatus;

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    // stdout carries the answer, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = match parse_args(std::env::args()) {
        Ok(CliCommand::Version) => {
            println!("{}", version_string());
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(CliCommand::Chat(args)) => args,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    init_logging();

    let config = CozeConfig::from_env().wrap_err("Failed to load configuration")?;
    tracing::debug!(base_url = %config.base_url, "configuration loaded");
    let client = ChatClient::new(config)?;

    let mut stdout = std::io::stdout().lock();
    let outcome = run_chat(&client, &args, &mut stdout).await?;

    let Some(chat) = outcome.chat else {
        tracing::warn!("stream ended before any chat status was reported");
        return Ok(());
    };

    match chat.status {
        ChatStatus::Completed => {
            tracing::info!(chat_id = %chat.id, conversation_id = %chat.conversation_id, "chat completed");
            Ok(())
        }
        ChatStatus::Failed => match chat.last_error {
            Some(err) => bail!("chat {} failed: {} (code {})", chat.id, err.msg, err.code),
            None => bail!("chat {} failed", chat.id),
        },
        status => {
            tracing::warn!(chat_id = %chat.id, %status, "chat ended without completing");
            Ok(())
        }
    }
}
