//! Command line entry point: provision the management certificate from a
//! publish settings file and print the formatted answer of each query.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use azmgmt::{
    ClientConfig, DEFAULT_ENDPOINT, DEFAULT_STORE_PATH, Query, RawFormatter, ResponseFormatter,
    RunOutcome, ServiceManager, TlsSettings, Url, XmlFormatter,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "azmgmt", version, about)]
struct Cli {
    /// Downloaded .publishsettings file
    #[arg(long, env = "AZMGMT_PUBLISH_SETTINGS")]
    publish_settings: PathBuf,

    #[arg(long, env = "AZMGMT_SUBSCRIPTION_ID")]
    subscription_id: String,

    /// Management API base URL
    #[arg(long, env = "AZMGMT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: Url,

    /// Where the transient keystore is written; removed on exit
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    store_path: PathBuf,

    /// PEM file with extra trust anchors for the endpoint
    #[arg(long)]
    ca_file: Option<PathBuf>,

    /// Trust only --ca-file, not the platform store
    #[arg(long, requires = "ca_file")]
    no_platform_roots: bool,

    /// Query to run; repeat for several (default: all, in order)
    #[arg(long = "query", value_enum)]
    queries: Vec<Query>,

    /// Print response bodies without re-indenting
    #[arg(long)]
    raw: bool,
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        let mut tls = TlsSettings::default().with_platform_roots(!self.no_platform_roots);
        if let Some(ca_file) = &self.ca_file {
            let pem_text = std::fs::read_to_string(ca_file)
                .with_context(|| format!("failed to read CA file {}", ca_file.display()))?;
            tls = tls
                .with_extra_roots_pem(&pem_text)
                .with_context(|| format!("invalid CA file {}", ca_file.display()))?;
        }

        Ok(
            ClientConfig::new(&self.publish_settings, &self.subscription_id)
                .with_endpoint(self.endpoint.clone())
                .with_store_path(&self.store_path)
                .with_tls(tls),
        )
    }

    fn queries(&self) -> Vec<Query> {
        if self.queries.is_empty() {
            Query::ALL.to_vec()
        } else {
            self.queries.clone()
        }
    }

    fn formatter(&self) -> Box<dyn ResponseFormatter> {
        if self.raw {
            Box::new(RawFormatter)
        } else {
            Box::new(XmlFormatter::default())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
///
/// The SIGTERM handler is installed before this returns, so a signal that
/// arrives while the keystore is being provisioned is not lost.
fn shutdown_signal() -> impl Future<Output = ()> {
    #[cfg(unix)]
    let terminate = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
        Ok(stream) => Some(stream),
        Err(e) => {
            tracing::warn!("Cannot listen for SIGTERM: {}", e);
            None
        }
    };

    async move {
        let interrupt = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        {
            let terminate = async {
                match terminate {
                    Some(mut stream) => {
                        stream.recv().await;
                    }
                    None => std::future::pending::<()>().await,
                }
            };
            tokio::select! {
                () = interrupt => {}
                () = terminate => {}
            }
        }

        #[cfg(not(unix))]
        interrupt.await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let shutdown = shutdown_signal();

    let config = cli.client_config()?;
    let manager = ServiceManager::connect(config).with_context(|| {
        format!(
            "failed to set up the management certificate from {}",
            cli.publish_settings.display()
        )
    })?;

    let formatter = cli.formatter();
    let queries = cli.queries();
    let mut stdout = std::io::stdout().lock();
    let outcome = manager
        .run_until(&queries, formatter.as_ref(), &mut stdout, shutdown)
        .await
        .context("query run failed")?;

    match outcome {
        RunOutcome::Completed => Ok(()),
        RunOutcome::Interrupted => Err(anyhow!("interrupted")),
    }
}
