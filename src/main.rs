//! Symptom Learn - learning prompts for logged symptoms
//!
//! Command-line front end over the symptom learning engine.

use symptom_learning::cli;

fn main() -> anyhow::Result<()> {
    // Initialize logging (WARN level by default, use RUST_LOG=debug for matcher output)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into())
        )
        .init();

    cli::run()
}
