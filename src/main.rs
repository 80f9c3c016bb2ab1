pub mod config;
pub mod logger;
pub mod scanner;
pub mod source;
pub mod webhook;

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use log::{error, info, Level};

use crate::config::{Config, ConfigError};
use crate::logger::Logger;
use crate::scanner::Scanner;
use crate::source::ScanResults;

/// Run a security scanner and send its results to a webhook
#[derive(Parser, Debug)]
#[command(
    name = "trivy-webhook",
    version,
    about,
    override_usage = "trivy webhook -- --url=<webhook-url> -- <trivy args>"
)]
struct Cli {
    /// Webhook endpoint url
    #[arg(short, long, env = "TRIVY_WEBHOOK_URL")]
    url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scanner command to run
    #[arg(long, env = "TRIVY_WEBHOOK_SCANNER")]
    scanner: Option<String>,

    /// Output format passed to the scanner unless one is already given
    #[arg(long)]
    format: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<Level>,

    /// Scanner arguments, or "-" (or nothing) to read results from stdin
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn usage() {
    eprintln!("{}", Cli::command().render_help());
}

// Flags win over the config file, which wins over the defaults.
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load_file(&path)?,
        None => Config::default(),
    };

    if let Some(url) = &cli.url {
        config.webhook.url = url.clone();
    }
    if let Some(scanner) = &cli.scanner {
        config.scanner.command = scanner.clone();
    }
    if let Some(format) = &cli.format {
        config.scanner.format = Some(format.clone());
    }
    if let Some(level) = cli.log_level {
        config.logger.level = level;
    }

    Ok(config)
}

fn run(config: &Config, args: &[String]) -> Result<()> {
    if let Err(err) = config.validate() {
        usage();
        return Err(err.into());
    }

    let results = if ScanResults::reads_stdin(args) {
        info!("reading scanning results from stdin...");
        ScanResults::stdin()
    } else {
        info!("running {}...", config.scanner.command);
        let scanner = Scanner::new(&config.scanner);

        match scanner.run(&env::args().collect::<Vec<_>>(), scanner::command) {
            Ok(output) => ScanResults::Captured(output),
            Err(err) => {
                usage();
                bail!(
                    "{} returned an error: {}, output: {}",
                    config.scanner.command,
                    err,
                    String::from_utf8_lossy(err.output())
                );
            }
        }
    };

    info!("sending results to webhook...");
    let client = webhook::client(config.webhook.timeout())?;
    let resp = webhook::post(&config.webhook.url, &client, results)
        .context("failed to send to webhook")?;

    info!("webhook returned: {}", String::from_utf8_lossy(&resp));
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", anyhow::Error::from(err).context("could not load config"));
            process::exit(1);
        }
    };

    if let Err(err) = Logger::init(&config.logger) {
        eprintln!("{err}");
        process::exit(1);
    }

    if let Err(err) = run(&config, &cli.args) {
        error!("unexpected error: {err:#}");
        process::exit(1);
    }
}
