//! sageone-sign - print the authentication headers for a Sage One API call.
//!
//! Signs one request described on the command line with credentials taken from
//! the environment and writes the six headers as a JSON object to stdout. No
//! request is sent.
//!
//! # Usage
//!
//! ```text
//! sageone-sign [--nonce <NONCE>] [--user-agent <UA>] [--debug] <METHOD> <URL> [KEY=VALUE ...]
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SAGEONE_SIGNING_SECRET` | *(unset)* | Application signing secret |
//! | `SAGEONE_ACCESS_TOKEN` | *(unset)* | OAuth access token |
//! | `SAGEONE_USER_AGENT` | `sageone-signer/<version>` | `User-Agent` header value |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use sageone_signer::SignerConfig;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Print the signed request headers for a Sage One API call as JSON.
#[derive(Debug, Parser)]
#[clap(name = "sageone-sign", version, about)]
struct Args {
    /// Use this nonce instead of a random one
    #[clap(long)]
    nonce: Option<String>,
    /// User-Agent header value (default: $SAGEONE_USER_AGENT)
    #[clap(long)]
    user_agent: Option<String>,
    /// Log the parameter string and signature base string
    #[clap(long)]
    debug: bool,
    /// HTTP method, case-insensitive
    method: String,
    /// Absolute target URL, query string included
    url: String,
    /// Body parameters as KEY=VALUE
    #[clap(value_parser = parse_key_val)]
    body: Vec<(String, String)>,
}

/// Split a `KEY=VALUE` argument on its first `=`.
fn parse_key_val(pair: &str) -> Result<(String, String)> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| anyhow!("body parameter must be KEY=VALUE: {pair}"))?;
    Ok((key.to_owned(), value.to_owned()))
}

/// Initialize the tracing subscriber on stderr.
///
/// Uses `RUST_LOG` if set, otherwise falls back to `log_level`.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = SignerConfig::from_env();
    init_tracing(if args.debug { "debug" } else { config.log_level.as_str() })?;

    let mut request = config.request(&args.method, &args.url, args.body.into_iter().collect());
    if let Some(nonce) = args.nonce {
        request = request.with_nonce(nonce);
    }

    let signed = request
        .sign()
        .with_context(|| format!("failed to sign {} {}", args.method, args.url))?;

    debug!(
        parameter_string = %signed.parameter_string(),
        signature_base_string = %signed.signature_base_string(),
        "computed signature"
    );

    let user_agent = args.user_agent.as_deref().unwrap_or(&config.user_agent);
    let headers = signed.request_headers(user_agent);

    info!(method = %signed.request_method(), base_url = %signed.base_url(), "signed request");

    println!(
        "{}",
        serde_json::to_string_pretty(&headers).context("failed to serialize headers")?
    );

    Ok(())
}
