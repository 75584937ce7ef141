// # ddns-oneshot - one-shot dynamic DNS updater
//
// This binary is a THIN integration layer:
// 1. Parse the command line
// 2. Initialize logging and the runtime
// 3. Load the auth config and build one HTTP client
// 4. Wire the Cloudflare provider and HTTP IP source into the Reconciler
// 5. Print the outcome and exit
//
// All reconciliation logic lives in ddns-core. Run it from cron or a
// systemd timer; each invocation makes at most one DNS change.
//
// ## Example
//
// ```bash
// ddns-oneshot --config-path ~/authconfig.json \
//     --zone C6tbxEC4nDBzP6sKYJ7gdnvyQXi3VKDq \
//     --name home.example.org
// ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ddns_core::config::{DEFAULT_IP_PROVIDER_URL, DEFAULT_TTL};
use ddns_core::{AuthConfig, Outcome, ReconcileRequest, Reconciler};
use ddns_ip_http::HttpIpSource;
use ddns_provider_cloudflare::{CLOUDFLARE_API_BASE, CloudflareProvider};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Timeout applied to every HTTP request
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const EXAMPLES: &str = "\
Examples:
  Common:
    ddns-oneshot --config-path ~/authconfig.json --zone C6tbxEC4nDBzP6sKYJ7gdnvyQXi3VKDq --name test.example.org

  Using a custom IP provider:
    ddns-oneshot --config-path ~/authconfig.json --zone C6tbxEC4nDBzP6sKYJ7gdnvyQXi3VKDq --name test.example.org --ip-provider https://echo.example.org

  Using a custom TTL:
    ddns-oneshot --config-path ~/authconfig.json --zone C6tbxEC4nDBzP6sKYJ7gdnvyQXi3VKDq --name test.example.org --ttl 360

The config file is JSON: { \"CloudflareApiToken\": \"<token>\" }";

/// Exit codes
///
/// Every failure, including bad arguments, exits with 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    /// Record created, updated, or already up to date
    Success = 0,
    /// Any failure
    Failure = 1,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Whether DNS writes are sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RunMode {
    /// Create and update records
    Live,
    /// Log the create or update instead of sending it
    DryRun,
}

/// Point a Cloudflare "A" record at this machine's public IPv4 address
#[derive(Debug, Parser)]
#[command(name = "ddns-oneshot", version, about, after_help = EXAMPLES)]
struct Cli {
    /// Path to the configuration file that contains your Cloudflare API token
    #[arg(long = "config-path", value_name = "PATH")]
    config_path: PathBuf,

    /// The Cloudflare zone identifier
    #[arg(long)]
    zone: String,

    /// The DNS name to use in the zone
    #[arg(long)]
    name: String,

    /// The DNS record time-to-live (TTL) in seconds
    #[arg(long, default_value_t = DEFAULT_TTL)]
    ttl: u32,

    /// URL for a service that returns your public IP as plain text
    #[arg(long = "ip-provider", value_name = "URL", default_value = DEFAULT_IP_PROVIDER_URL)]
    ip_provider: String,

    /// Look up everything but do not create or update the record
    #[arg(long)]
    dry_run: bool,

    /// Run mode; `dry-run` is the same as --dry-run
    #[arg(long, env = "DDNS_MODE", value_enum, ignore_case = true)]
    mode: Option<RunMode>,

    /// Log verbosity
    #[arg(
        long,
        env = "DDNS_LOG_LEVEL",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    log_level: String,

    /// Cloudflare API root
    #[arg(long, env = "DDNS_CLOUDFLARE_API_BASE", default_value = CLOUDFLARE_API_BASE, hide = true)]
    api_base_url: String,
}

impl Cli {
    /// Dry-run via `--dry-run`, `--mode dry-run` or `DDNS_MODE=dry-run`
    fn dry_run_requested(&self) -> bool {
        self.dry_run || self.mode == Some(RunMode::DryRun)
    }

    fn request(&self) -> ReconcileRequest {
        ReconcileRequest::new(&self.zone, &self.name).with_ttl(self.ttl)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version also arrive here
            return if e.use_stderr() {
                DdnsExitCode::Failure.into()
            } else {
                DdnsExitCode::Success.into()
            };
        }
    };

    init_tracing(&cli.log_level);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::Failure.into();
        }
    };

    runtime.block_on(run(&cli)).into()
}

/// Sets up the tracing subscriber; logs go to stderr so stdout carries
/// only the outcome line.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::builder()
        .with_default_directive(
            log_level
                .parse()
                .unwrap_or_else(|_| tracing::Level::INFO.into()),
        )
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run once and report the outcome
async fn run(cli: &Cli) -> DdnsExitCode {
    match reconcile(cli).await {
        Ok(outcome) => {
            println!("{}", outcome);
            DdnsExitCode::Success
        }
        Err(e) => {
            debug!("Reconciliation failed: {:?}", e);
            eprintln!("{:#}", e);
            DdnsExitCode::Failure
        }
    }
}

async fn reconcile(cli: &Cli) -> Result<Outcome> {
    // Config first: a missing file must not cost a single request
    let auth = AuthConfig::load(&cli.config_path)?;

    let client = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("ddns-oneshot/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let dry_run = cli.dry_run_requested();
    if dry_run {
        warn!("Running in DRY-RUN mode - no DNS changes will be made");
    }

    let provider = CloudflareProvider::new(client.clone(), auth.api_token())?
        .with_api_base(cli.api_base_url.as_str())
        .with_dry_run(dry_run);
    let ip_source = HttpIpSource::new(client, cli.ip_provider.as_str());

    let reconciler = Reconciler::new(Box::new(provider), Box::new(ip_source));

    info!("Reconciling {} in zone {}", cli.name, cli.zone);
    let outcome = reconciler.reconcile(&cli.request()).await?;
    Ok(outcome)
}
