mod config;
mod main_lib;

use config::Config;
use main_lib::{build_state, init_tracing, run_session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);

    let state = build_state(&config)?;
    let summary = run_session(&state).await?;

    tracing::info!(
        "Session finished: {} favorited, {} deleted, {} remaining",
        summary.favorited,
        summary.deleted,
        summary.remaining
    );
    Ok(())
}
