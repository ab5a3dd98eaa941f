// src/main.rs

use anyhow::Result;
use clap::Parser;
use repodigest::cli::Cli;
use repodigest::config::ConfigBuilder;
use repodigest::progress::ProgressReporter;
use repodigest::run;
use std::sync::Arc;

#[cfg(feature = "progress")]
use repodigest::progress::IndicatifProgress;

fn main() -> Result<()> {
    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    let default_directive = if cfg!(debug_assertions) {
        "repodigest=debug"
    } else {
        "repodigest=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
        )
        .init();

    log::debug!("Starting repodigest v{}...", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    // Show a clone progress bar only when stderr is a terminal.
    let progress_reporter: Option<Arc<dyn ProgressReporter>> = {
        #[cfg(feature = "progress")]
        {
            if atty::is(atty::Stream::Stderr) {
                Some(Arc::new(IndicatifProgress::new()))
            } else {
                None
            }
        }
        #[cfg(not(feature = "progress"))]
        {
            None
        }
    };

    let result = ConfigBuilder::from_cli(cli).build().and_then(|config| {
        let mut stdout = std::io::stdout().lock();
        run(&config, progress_reporter, &mut stdout)?;
        if config.copy_to_clipboard() {
            eprintln!("Repository digest copied to clipboard.");
        }
        Ok(())
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
