//! Verity batch entrypoint: `verity [input] [output]`.

use std::path::PathBuf;

use mimalloc::MiMalloc;

use verity::batch::run_batch;
use verity::config::Config;
use verity::pipeline::Pipeline;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = Config::from_env()?;
    let mut args = std::env::args().skip(1);
    if let Some(input) = args.next() {
        config.input_path = PathBuf::from(input);
    }
    if let Some(output) = args.next() {
        config.output_path = PathBuf::from(output);
    }
    config.validate()?;

    tracing::info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        kb_source = %config.kb_source,
        "Verity starting"
    );

    let pipeline = Pipeline::from_config(&config)?;
    let summary = run_batch(
        &pipeline,
        &config.input_path,
        &config.output_path,
        config.inconclusive_policy,
    )
    .await?;

    tracing::info!(
        processed = summary.processed,
        skipped = summary.skipped,
        inconclusive = summary.inconclusive,
        "Verity finished"
    );

    Ok(())
}
