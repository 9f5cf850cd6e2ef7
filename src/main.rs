// src/main.rs

use bosh_ci::{cli, errors::Result, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("bosh-ci error: {err}");
        std::process::exit(err.exit_code());
    }
}

async fn run_main() -> Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
