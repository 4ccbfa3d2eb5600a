//! searchgraph CLI binary: run the web research workflow for one query.
//!
//! The query comes from `--query`, positional words, or stdin. Exit code 0
//! when the workflow reaches the report node, 1 on any error.

mod logging;

use clap::Parser;
use cli::{resolve_query, run, Args};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_config::load_and_apply("searchgraph", None::<&std::path::Path>).ok();
    let log_guard = logging::init()?;

    let args = Args::parse();

    let query = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut prompt = std::io::stderr();
        match resolve_query(&args, &mut input, &mut prompt) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("searchgraph: {}", e);
                drop(log_guard);
                std::process::exit(1);
            }
        }
    };

    match run(&args, &query).await {
        Ok(state) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("searchgraph: {}", e);
            tracing::error!(error = %e, "run failed");
            drop(log_guard);
            std::process::exit(1);
        }
    }
}
