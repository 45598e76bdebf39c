use anyhow::Context;
use clap::Parser;
use stock_ledger::utils::logger;
use stock_ledger::{CliConfig, CommandRunner, Settings, TomlConfig};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let file_config = match &config.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("failed to read settings file {}", path))?,
        ),
        None => None,
    };

    let settings = Settings::resolve(config.file.as_deref(), file_config.as_ref())
        .context("invalid configuration")?;

    if config.json_logs {
        logger::init_json_logger(config.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, settings.log_level.as_deref());
    }

    tracing::debug!("CLI config: {:?}", config);
    tracing::debug!("Using data file {}", settings.data_file.display());

    let runner = CommandRunner::new(settings);

    match runner.run(&config.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output.trim_end());
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e);
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
