use clap::Parser;
use tokio::signal;

use pyqseed::Cli;
use pyqseed::cli::seed::handle_seed;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tokio::select! {
        result = handle_seed(cli) => {
            if let Err(e) = result {
                eprintln!("{e:#}");
                std::process::exit(1);
            }
        }
        _ = shutdown_signal() => {
            // Completed runs are already durable; the in-flight run is
            // abandoned. Exit code distinguishes cancellation from failure.
            eprintln!("Cancelled.");
            std::process::exit(130);
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
