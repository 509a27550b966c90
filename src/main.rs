use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use delve::core::config;
use delve::core::session::Session;
use delve::provider::GitHubProvider;
use delve::repl::InteractiveRepl;

#[derive(Parser)]
#[command(name = "delve", about = "Walk a repository's tree like a dungeon")]
struct Args {
    /// Repository to explore, as owner/name
    repo: Option<String>,

    /// Historical reference (commit sha) to start from
    #[arg(short, long)]
    r#ref: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to delve.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("delve.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("could not load config: {e}");
            return ExitCode::from(1);
        }
    };
    let resolved = config::resolve(&file_config, args.repo.as_deref(), args.r#ref.as_deref());

    log::info!("delve starting up in {}", resolved.repo);

    let provider = Arc::new(GitHubProvider::new(
        resolved.repo.clone(),
        resolved.token.clone(),
        Some(resolved.base_url.clone()),
    ));
    let repl = match InteractiveRepl::new() {
        Ok(r) => Box::new(r),
        Err(e) => {
            eprintln!("could not initialize input: {e}");
            return ExitCode::from(1);
        }
    };

    let mut session = Session::new(
        provider,
        repl,
        std::io::stdout(),
        resolved.repo,
        resolved.reference,
        resolved.max_retries,
    );

    match session.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
