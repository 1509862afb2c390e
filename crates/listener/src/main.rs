use std::process::ExitCode;

use feed_listener::{Listener, ListenerConfig};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = match ListenerConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            error!(cause = %e, "invalid arguments");
            return ExitCode::FAILURE;
        }
    };

    let listener = match Listener::bind(&config).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(port = config.port(), cause = %e, "bind server error");
            return ExitCode::FAILURE;
        }
    };

    info!(port = config.port(), "start listening");
    listener.run().await;
    ExitCode::SUCCESS
}
