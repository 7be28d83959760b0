//! Form relay CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration**: load the optional TOML file given with
//!    `--config`, layer `FORM_RELAY_*` environment variables over it, and
//!    validate the result.
//! 2. **Wire observability**: configure `tracing-subscriber` with a JSON layer
//!    on stderr and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an
//!    OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: create the `ReqwestHttpClient` and inject
//!    it into the `WebhookSender`, `Notifier`, and `EventHandler`.
//! 4. **Select the entry point**:
//!    - `submit`: read one submission event (file or stdin) and relay it.
//!    - `test-webhook`: send the fixed manual test payload.
//!    - `check-config`: print configuration state and probe the health URL.

mod config;
mod observability;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relay::{
    EventHandler, FieldMapping, HttpClient, InvocationId, Notifier, RelayConfig, SubmissionEvent,
    WebhookSender,
};
use tracing::{error, info, info_span, Instrument};
use transport::ReqwestHttpClient;

#[derive(Debug, Parser)]
#[command(name = "form-relay", version, about = "Relay form submissions to a webhook server")]
struct Cli {
    /// Optional TOML configuration file; FORM_RELAY_* variables override it.
    #[arg(long, global = true, env = "FORM_RELAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Relay one submission event (`{"namedValues": {...}}`).
    Submit {
        /// Event file; `-` or absent reads stdin.
        #[arg(long)]
        event: Option<PathBuf>,
    },
    /// Send a fixed test payload to the webhook and print the result.
    TestWebhook,
    /// Print configuration state and probe the webhook server's health URL.
    CheckConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _telemetry = match observability::init() {
        Ok(telemetry) => telemetry,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let invocation = InvocationId::new_random();
    let span = info_span!("invocation", id = %invocation);
    match run(cli).instrument(span).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{e:#}"), "form-relay failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = config::load(cli.config.as_deref())?;
    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
    let sender = WebhookSender::new(client.clone(), config.webhook_url.clone());

    match cli.command {
        Command::Submit { event } => submit(&config, client, sender, event).await,
        Command::TestWebhook => {
            let result = relay::send_test_payload(&sender).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(exit_code(result.is_success()))
        }
        Command::CheckConfig => {
            let report = relay::check_configuration(&config, client).await;
            println!("{report}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn submit(
    config: &RelayConfig,
    client: Arc<dyn HttpClient>,
    sender: WebhookSender,
    event: Option<PathBuf>,
) -> Result<ExitCode> {
    let event = read_event(event)?;
    let notifier = Notifier::new(client, config.telegram());
    let handler = EventHandler::new(FieldMapping::default(), sender, notifier);

    match handler.handle(&event).await {
        Ok(delivered) => {
            info!(response = %delivered.response, "Submission relayed");
            println!("{}", serde_json::to_string_pretty(&delivered.payload)?);
            Ok(ExitCode::SUCCESS)
        }
        // Already logged and notified by the handler.
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

fn read_event(path: Option<PathBuf>) -> Result<SubmissionEvent> {
    let text = match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read event from stdin")?;
            text
        }
    };
    serde_json::from_str(&text).context("Event is not a valid {\"namedValues\": {...}} document")
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
