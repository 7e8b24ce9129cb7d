use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lead_tracker::backend::domain::commands::buyers::SearchBuyersCommand;
use lead_tracker::initialize_backend;

/// Small smoke run over the seeded store: sign in, inspect the pipeline,
/// and print an export. The real consumer of the backend is a UI layer.
fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let state = initialize_backend()?;

    let user = state
        .auth_service
        .sign_in("admin@company.com", "demo123")
        .ok_or_else(|| anyhow::anyhow!("demo sign-in failed"))?;
    info!("Signed in as {}", user.name);

    let stats = state.buyer_service.buyer_stats()?;
    info!(
        "Pipeline: {} leads ({} qualified, {} viewing, {} closed)",
        stats.total, stats.qualified, stats.viewing, stats.closed
    );

    let matches = state.buyer_service.search_buyers(SearchBuyersCommand {
        query: "smith".to_string(),
    })?;
    info!("Search for \"smith\" found {} lead(s)", matches.buyers.len());
    println!("{}", serde_json::to_string_pretty(&matches.buyers)?);

    let export = state.export_service.export_buyers(&state.buyer_service)?;
    info!("Export ready: {} ({} leads)", export.filename, export.buyer_count);
    print!("{}", export.csv_content);

    Ok(())
}
