use anyhow::Context;
use browsemate::{api, config, logging};
use clap::Parser;
use tokio::net::TcpListener;

/// BrowseMate demo catalog API.
#[derive(Debug, Parser)]
#[command(name = "browsemate", version, about)]
struct Args {
    /// Port to listen on; overrides `SERVER_PORT`.
    #[arg(long)]
    port: Option<u16>,
    /// Print the OpenAPI document as JSON and exit.
    #[arg(long)]
    print_openapi: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = config::load_config().context("Failed to load configuration")?;
    config.server_port = args.port.or(config.server_port);

    if args.print_openapi {
        let document = api::openapi_document(&config);
        let json = serde_json::to_string_pretty(&document).context("Failed to render OpenAPI")?;
        println!("{json}");
        return Ok(());
    }

    let level = if config.debug { "debug" } else { "info" };
    logging::init_tracing(logging::ConsoleTarget::Stdout, level);
    tracing::debug!(
        app_name = %config.app_name,
        app_version = %config.app_version,
        api_prefix = %config.api_prefix,
        server_port = ?config.server_port,
        cors_origins = ?config.cors_origins,
        "Loaded configuration"
    );

    let (listener, port) = bind_listener(config.server_port)
        .await
        .context("Failed to bind listener")?;
    tracing::info!(
        app = %config.app_name,
        version = %config.app_version,
        prefix = %config.api_prefix,
        "Listening on http://0.0.0.0:{}",
        port
    );
    tracing::info!("Swagger UI at http://0.0.0.0:{}/docs", port);

    let app = api::create_router(api::AppState::new(config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutting down");
}

async fn bind_listener(configured: Option<u16>) -> Result<(TcpListener, u16), std::io::Error> {
    use std::net::Ipv4Addr;

    if let Some(port) = configured {
        return TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
            .await
            .map(|listener| (listener, port));
    }

    const PORT_RANGE: std::ops::RangeInclusive<u16> = 8000..=8099;
    for port in PORT_RANGE {
        match TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await {
            Ok(listener) => {
                tracing::debug!(port, "Bound server port");
                return Ok((listener, port));
            }
            Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
                tracing::debug!(port, "Port already in use; trying next");
                continue;
            }
            Err(err) => return Err(err),
        }
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::AddrNotAvailable,
        "No available port found in range 8000-8099",
    ))
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn port_comes_only_from_the_flag() {
        let args = Args::try_parse_from(["browsemate", "--port", "9000"]).expect("args");
        assert_eq!(args.port, Some(9000));
        assert!(!args.print_openapi);

        let args = Args::try_parse_from(["browsemate", "--print-openapi"]).expect("args");
        assert_eq!(args.port, None);
        assert!(args.print_openapi);

        assert!(Args::try_parse_from(["browsemate", "--port", "70000"]).is_err());
    }
}
