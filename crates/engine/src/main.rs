//! moodsim - Main entry point.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodsim_engine::infrastructure::config::AppConfig;
use moodsim_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Working directory first, then the repo root; dotenvy never overrides.
    load_dotenv();

    // Initialize logging. Progress blocks own stdout, so logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodsim=info,moodsim_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting moodsim");

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        input = %config.simulation.input_path.display(),
        output = %config.simulation.output_path.display(),
        history_capacity = config.simulation.history_capacity,
        default_mood = %config.simulation.default_mood,
        mode = %config.classifier.mode,
        "Configuration loaded"
    );

    let app = App::from_config(&config);

    let report = app
        .use_cases
        .conversation
        .simulate
        .execute()
        .await
        .context("Simulation failed")?;

    tracing::info!(
        turns = report.turns(),
        players = report.players,
        classification_fallbacks = report.classification_fallbacks,
        reply_fallbacks = report.reply_fallbacks,
        output = %config.simulation.output_path.display(),
        "Done"
    );

    Ok(())
}

fn load_dotenv() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for dir in [std::path::PathBuf::from("."), repo_root] {
        for filename in [".env.local", ".env"] {
            let path = dir.join(filename);
            if path.exists() {
                let _ = dotenvy::from_path(path);
            }
        }
    }
}
