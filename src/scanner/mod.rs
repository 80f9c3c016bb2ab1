pub mod args;

mod process;

use std::io;
use std::process::{Command, ExitStatus};

use log::{debug, info};
use thiserror::Error;

use crate::config::ScannerConfig;
use args::DefaultFlag;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid arguments specified")]
    InvalidArguments,

    #[error("could not run scanner: {0}")]
    CouldNotRun(#[from] io::Error),

    #[error("{}", describe(.status))]
    ProcessFailed { status: ExitStatus, output: Vec<u8> },
}

impl ScanError {
    /// Whatever the scanner printed before failing. Empty if it never ran.
    pub fn output(&self) -> &[u8] {
        match self {
            ScanError::ProcessFailed { output, .. } => output,
            _ => &[],
        }
    }
}

fn describe(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {code}"),
        None => status.to_string(),
    }
}

/// Builds the real scanner process. Tests swap this out for a fake.
pub fn command(program: &str, args: &[String]) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd
}

pub struct Scanner<'s> {
    config: &'s ScannerConfig,
}

impl<'s> Scanner<'s> {
    pub fn new(config: &'s ScannerConfig) -> Scanner<'s> {
        Scanner { config }
    }

    fn default_flags(&self) -> Vec<DefaultFlag> {
        let mut flags = vec![
            DefaultFlag::switch("quiet"),
            DefaultFlag::value("timeout", &self.config.timeout),
        ];

        if let Some(format) = &self.config.format {
            flags.push(DefaultFlag::value("format", format));
        }

        flags
    }

    /// Runs the scanner with everything in `args` after the separator, plus
    /// any missing default flags, and returns its combined output.
    ///
    /// `args` is the full argument vector of this process. `spawn` turns the
    /// scanner command and its arguments into a process to run; it is not
    /// called at all when `args` has no scanner arguments.
    pub fn run<F>(&self, args: &[String], spawn: F) -> Result<Vec<u8>, ScanError>
    where
        F: FnOnce(&str, &[String]) -> Command,
    {
        let start = args::find_separator(args).ok_or(ScanError::InvalidArguments)?;
        let scanner_args = args::inject_defaults(args[start..].to_vec(), &self.default_flags());

        info!(
            "running {} {}",
            self.config.command,
            scanner_args.join(" ")
        );
        let (output, status) = process::combined_output(spawn(&self.config.command, &scanner_args))?;

        if !status.success() {
            return Err(ScanError::ProcessFailed { status, output });
        }

        debug!(
            "{} returned: {}",
            self.config.command,
            String::from_utf8_lossy(&output)
        );
        Ok(output)
    }
}
