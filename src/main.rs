use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use equationator::config::{Cli, Command, DrillArgs, ServeArgs};
use equationator::server::{new_cache, router};
use equationator::{generate_question, QuestionRequest};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("equationator=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let addr = args.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Equationator running at http://{addr}");
    axum::serve(listener, router(new_cache())).await?;
    Ok(())
}

fn drill(args: DrillArgs) -> anyhow::Result<()> {
    let config = args.generation_config()?;
    for i in 0..args.count {
        let question = generate_question(QuestionRequest {
            config,
            display_format: args.format,
            rng_seed: args.seed.map(|s| s.wrapping_add(i as u64)),
        });
        println!("{}", serde_json::to_string_pretty(&question)?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Drill(args) => drill(args),
    }
}
