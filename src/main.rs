// src/main.rs

use stablewatch::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("stablewatch error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    let _log_guard = logging::init_logging(args.log_level, args.log_dir.as_deref())?;
    run(args).await
}
