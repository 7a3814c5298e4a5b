//! order-desk binary entry point.

use std::process::ExitCode;
use std::sync::Arc;

use order_desk::api::{serve_with_state, AppState};
use order_desk::cli::{self, Args};
use order_desk::config::Config;
use order_desk::{logging, Backend, DialogueEngine, HttpBackend, InMemoryBackend};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'order-desk --help' for more information.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(&args)?;

    logging::init_with_filter(config.log_filter()).ok();

    info!("order-desk v{}", env!("CARGO_PKG_VERSION"));

    let backend: Arc<dyn Backend> = if config.backend.in_memory {
        info!("using in-memory demo data");
        Arc::new(InMemoryBackend::with_demo_data())
    } else {
        info!(url = %config.backend.base_url, "using REST data store");
        Arc::new(HttpBackend::new(
            config.backend.base_url.clone(),
            config.backend.timeout(),
        )?)
    };

    let engine = DialogueEngine::new(backend).with_policy(config.to_policy());
    let server_config = config.to_server_config()?;

    serve_with_state(server_config, AppState::new(engine)).await?;
    Ok(())
}
