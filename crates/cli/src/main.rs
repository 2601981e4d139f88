//! prevent-public-repos entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration** — command-line flags, each with an environment
//!    variable fallback (`GITHUB_TOKEN`, `ORG_WIDE_REPO_NAME`, `FILE_NAME`, ...).
//! 2. **Wire observability** — configure `tracing-subscriber` with a text or
//!    JSON layer and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an
//!    OpenTelemetry OTLP exporter. All `tracing` spans and structured events
//!    emitted by every crate in the workspace flow through this layer.
//! 3. **Construct infrastructure** — create the `GithubClient`, inject it into
//!    the `Enforcer`, and hand the enforcer to the webhook `Dispatcher`.
//! 4. **Serve** — run the webhook listener until Ctrl-C or SIGTERM.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use enforcer::Enforcer;
use github::GithubClient;
use listener::Dispatcher;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::TracerProvider;
use policy::ConfigLocation;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const SERVICE_NAME: &str = "prevent-public-repos";

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "prevent-public-repos",
    about = "GitHub App that reports or reverts public repositories",
    version,
    long_about = None
)]
struct Cli {
    /// Address the webhook listener binds to.
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:3000")]
    listen: SocketAddr,

    /// GitHub REST API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = github::DEFAULT_API_URL)]
    api_url: String,

    /// Token used for GitHub API calls.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Organization-wide settings repository holding the policy file.
    #[arg(long = "org-repo", env = "ORG_WIDE_REPO_NAME")]
    org_wide_repo_name: Option<String>,

    /// Path of the policy file inside the settings repository.
    #[arg(long = "config-path", env = "FILE_NAME")]
    file_name: Option<String>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// OTLP collector endpoint; spans are only exported when set.
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    otlp_endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let tracer_provider = init_tracing(cli.log_format, cli.otlp_endpoint.as_deref())?;

    let result = run(cli).await;

    if let Some(provider) = tracer_provider {
        if let Err(err) = provider.shutdown() {
            eprintln!("failed to flush OpenTelemetry spans: {err}");
        }
    }
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let location = ConfigLocation::with_overrides(
        cli.org_wide_repo_name.as_deref(),
        cli.file_name.as_deref(),
    );

    let client = Arc::new(
        GithubClient::new(&cli.api_url, cli.token).context("failed to create GitHub client")?,
    );
    let enforcer = Enforcer::new(client.clone(), client.clone(), location);
    info!(
        api_url = client.api_url(),
        config = %enforcer.location(),
        "{SERVICE_NAME} starting"
    );

    let dispatcher = Arc::new(Dispatcher::new(Arc::new(enforcer)));
    listener::serve(cli.listen, dispatcher, shutdown_signal())
        .await
        .context("webhook listener failed")?;

    info!("{SERVICE_NAME} shut down");
    Ok(())
}

/// Installs the global subscriber. Returns the tracer provider when OTLP
/// export is enabled so it can be flushed on exit.
fn init_tracing(
    format: LogFormat,
    otlp_endpoint: Option<&str>,
) -> anyhow::Result<Option<TracerProvider>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };

    let provider = match otlp_endpoint {
        Some(endpoint) => {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint)
                .build()
                .context("failed to build OTLP span exporter")?;
            Some(
                TracerProvider::builder()
                    .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
                    .build(),
            )
        }
        None => None,
    };
    let otel_layer = provider.as_ref().map(|provider| {
        opentelemetry::global::set_tracer_provider(provider.clone());
        tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME))
    });

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(otel_layer)
        .with(filter)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(provider)
}

async fn shutdown_signal() {
    let ctrl_c = wait_for_ctrl_c(tokio::signal::ctrl_c());

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
    }

    info!("shutdown signal received");
}

/// Waits for Ctrl-C. A handler that cannot be installed is logged and counts
/// as a shutdown request.
async fn wait_for_ctrl_c<F>(ctrl_c: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = ctrl_c.await {
        tracing::error!(%err, "ctrl-c signal handler failed");
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
