use std::io;
use std::process::ExitCode;

use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oauth2_exchange::{
    Credentials, FlowState, ProviderEndpoints, StdinLines, print_missing_config, run_exchange,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=info,oauth2_exchange=warn", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::debug!("Stopping in {:?}: {}", FlowState::MissingConfig, e);
            // Exit code 1 still signals the problem if stderr is gone
            print_missing_config(&mut io::stderr(), &e).ok();
            return ExitCode::from(1);
        }
    };
    let endpoints = ProviderEndpoints::from_env();

    let mut stdout = io::stdout();
    match run_exchange(&credentials, &endpoints, StdinLines::new(), &mut stdout).await {
        Ok(outcome) => {
            tracing::info!("Finished in {:?}", outcome.final_state());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Exchange run aborted: {}", e);
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}
