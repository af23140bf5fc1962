//! SVN Repository Browser - a read-only web API over a directory of stores
//!
//! # Usage
//! ```bash
//! svn-browser --repos-root /svn/repos               # Serve on 127.0.0.1:5000
//! svn-browser --repos-root /svn/repos --port 8080   # Custom port
//! SVN_REPOS_PATH=/srv/svn svn-browser               # Root from environment
//! ```

mod config;
mod error;
mod models;
mod routes;
mod svn;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::SvnConfig;
use svn::SvnService;

/// SVN Repository Browser - Browse svn repositories over HTTP
#[derive(Parser)]
#[command(name = "svn-browser")]
#[command(about = "A read-only browser for a directory of svn repositories", long_about = None)]
struct Cli {
    /// Directory containing the repository stores
    #[arg(long, env = "SVN_REPOS_PATH", default_value = "/svn/repos")]
    repos_root: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, env = "PORT", default_value = "5000")]
    port: u16,

    /// svnlook binary used for all queries
    #[arg(long, env = "SVNLOOK_BIN", default_value = "svnlook")]
    svnlook: String,

    /// svnadmin binary used to create stores
    #[arg(long, env = "SVNADMIN_BIN", default_value = "svnadmin")]
    svnadmin: String,

    /// Kill any single svnlook/svnadmin call after this many seconds (0 = never)
    #[arg(long, default_value = "30")]
    command_timeout_secs: u64,

    /// Revisions fetched in parallel when building a commit log
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u64).range(1..))]
    log_concurrency: u64,
}

impl Cli {
    fn svn_config(&self) -> SvnConfig {
        SvnConfig {
            svnlook: self.svnlook.clone(),
            svnadmin: self.svnadmin.clone(),
            command_timeout: (self.command_timeout_secs > 0)
                .then(|| Duration::from_secs(self.command_timeout_secs)),
            log_concurrency: self.log_concurrency as usize,
            ..SvnConfig::new(self.repos_root.clone())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = cli.svn_config();
    if !config.repos_root.is_dir() {
        tracing::warn!(
            "Storage root {} does not exist or is not a directory",
            config.repos_root.display()
        );
    }

    let svn = Arc::new(SvnService::new(config));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(svn.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    tracing::info!(
        root = %svn.config.repos_root.display(),
        "Serving repositories on http://{}",
        addr
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutting down");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
