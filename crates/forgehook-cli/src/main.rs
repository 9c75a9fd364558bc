use anyhow::Context;
use clap::Parser;
use forgehook_core::{PushEvent, TriggerConfig};
use forgehook_trigger::{ChangeTrigger, SUCCESS_MARKER, TriggerOutcome};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "forgehook",
    about = "Trigger CodeBuild image builds from CodeCommit push notifications"
)]
#[command(version)]
struct Cli {
    /// Path to the push notification JSON, or '-' to read stdin
    #[arg(long, default_value = "-")]
    event: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let raw = if cli.event.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("failed to read event from stdin")?
    } else {
        std::fs::read_to_string(&cli.event)
            .with_context(|| format!("failed to read event from {}", cli.event.display()))?
    };

    let event: PushEvent =
        serde_json::from_str(&raw).context("failed to parse push notification")?;
    let config = TriggerConfig::from_env()?;
    tracing::debug!(project = %config.build_project, "configuration loaded");

    let trigger = ChangeTrigger::new();
    match trigger.handle(&event, &config).await? {
        TriggerOutcome::BuildStarted { build_id } => println!("Started build {build_id}"),
        TriggerOutcome::Skipped => {
            println!("Changed files do not match any trigger; image build suppressed")
        }
    }

    println!("{SUCCESS_MARKER}");
    Ok(())
}
