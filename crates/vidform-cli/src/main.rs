//! vidform CLI: submit audio to the video-generation webhook.
//!
//! Set VIDFORM_WEBHOOK_URL (or WEBHOOK_URL), or pass --endpoint.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use vidform_api_client::WebhookClient;
use vidform_cli::form::{run_form, HELP};
use vidform_cli::{describe_select_error, describe_session, init_tracing, TerminalNotifier};
use vidform_core::{
    ClientConfig, ErrorMetadata, FormSession, MediaSlot, Orientation, SubmissionController,
    SubtitleMode, WorkflowStatus,
};

#[derive(Parser)]
#[command(name = "vidform", about = "Create a video from an audio file")]
struct Cli {
    /// Webhook URL, overriding VIDFORM_WEBHOOK_URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one video request and wait for the result
    Submit {
        /// Base video ID; the current time and date are appended
        #[arg(long, default_value = "")]
        id: String,
        /// Audio file (max 5MB)
        #[arg(long)]
        audio: PathBuf,
        /// Background music (max 5MB)
        #[arg(long)]
        music: Option<PathBuf>,
        /// landscape or portrait
        #[arg(long, default_value = "landscape")]
        orientation: Orientation,
        /// with or without
        #[arg(long, default_value = "without")]
        subtitles: SubtitleMode,
    },
    /// Fill in the form interactively
    Form,
}

fn load(session: &mut FormSession, audio: &Path, music: Option<&Path>) -> anyhow::Result<()> {
    session
        .select_path(MediaSlot::Audio, audio)
        .map_err(|e| anyhow::anyhow!(describe_select_error(&e)))?;

    if let Some(path) = music {
        session
            .select_path(MediaSlot::BackgroundMusic, path)
            .map_err(|e| anyhow::anyhow!(describe_select_error(&e)))?;
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("Invalid client configuration")?;
    if let Some(endpoint) = cli.endpoint {
        config = config.with_webhook_url(endpoint)?;
    }
    let client = WebhookClient::from_config(&config)?;
    tracing::debug!(webhook_url = client.webhook_url(), "Using webhook");

    let controller = SubmissionController::new(Arc::new(client), Arc::new(TerminalNotifier));
    let mut session = FormSession::new();

    match cli.command {
        Commands::Submit {
            id,
            audio,
            music,
            orientation,
            subtitles,
        } => {
            session.set_base_id(id);
            session.set_orientation(orientation);
            session.set_subtitles(subtitles);
            load(&mut session, &audio, music.as_deref())?;

            controller.submit(&mut session).await;

            if let WorkflowStatus::Failed { error, .. } = session.status() {
                anyhow::bail!("{} ({})", error.client_message(), error.error_code());
            }
        }
        Commands::Form => {
            println!("{}\n", HELP);
            println!("{}", describe_session(&session));
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            run_form(&controller, &mut session, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
