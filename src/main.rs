use clap::Parser;

use staticsrv::config::Args;
use staticsrv::lifecycle::{spawn_signal_handler, Shutdown};
use staticsrv::observability::logging;
use staticsrv::StaticServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.into_config()?;

    logging::init(&config.observability.log_level);

    tracing::info!(version = staticsrv::VERSION, "staticsrv starting");

    let result = async {
        let server = StaticServer::new(config)?;
        let shutdown = Shutdown::new();
        spawn_signal_handler(shutdown.clone());
        server.serve(shutdown).await
    }
    .await;

    if let Err(e) = result {
        tracing::error!(error = %e, "Fatal error");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
