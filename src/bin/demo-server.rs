//! Demo server exposing a single `/v1/ping` endpoint.
//!
//! Useful for poking at the envelope and error behavior by hand:
//!
//! ```text
//! curl 'localhost:8080/v1/ping?req={"Msg":"hi"}'
//! curl 'localhost:8080/v1/ping?req={"Msg":"hi","FailWith":"boom"}'
//! ```

use std::path::PathBuf;

use anyhow::anyhow;
use axum::http::Method;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apiframe::http::middleware::{json_content_type, request_logger};
use apiframe::{
    adapt, ApiError, MiddlewareSet, RequestContext, Route, Server, ServerConfig, Validate,
};

#[derive(Parser)]
#[command(name = "demo-server")]
#[command(about = "Demo API server built on apiframe", long_about = None)]
struct Cli {
    /// Interface to bind.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on.
    #[arg(long)]
    port: Option<u16>,

    /// Optional TOML config file; flags override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct PingReq {
    msg: String,
    fail_with: String,
}

impl Validate for PingReq {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PingResp {
    msg: String,
}

async fn ping(_ctx: RequestContext, req: PingReq) -> Result<PingResp, ApiError> {
    if !req.fail_with.is_empty() {
        return Err(ApiError::Internal(anyhow!("{}", req.fail_with)));
    }
    Ok(PingResp {
        msg: format!("You said: {}", req.msg),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apiframe=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let routes = vec![Route {
        method: "GET".to_string(),
        version: 1,
        path: "ping".to_string(),
        handler: Some(adapt(Method::GET, ping)?),
        requires_auth: false,
    }];
    let middleware = MiddlewareSet {
        pre: vec![request_logger(), json_content_type()],
        auth: None,
        post: Vec::new(),
    };

    let server = Server::new(routes, middleware)?;
    tracing::info!(address = %config.addr(), "starting demo server");
    server.serve(&config).await?;

    Ok(())
}
