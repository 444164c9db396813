mod cli;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = cli::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Process {
            inputs,
            output,
            group_size,
            name_mode,
            workers,
        } => {
            if let Some(size) = group_size {
                settings.pipeline.group_size = size;
            }
            if let Some(mode) = name_mode {
                settings.pipeline.name_parsing_mode = mode;
            }
            if let Some(workers) = workers {
                settings.driver.max_workers = workers;
            }
            settings.validate()?;
            cli::process::run(&inputs, settings, output.as_deref()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { field, value } => cli::check::run(field, &value, &settings),
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
