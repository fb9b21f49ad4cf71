//! Command-line formatter and validator for mallorn notation

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mallorn::{print::pretty, read_all_str};

#[derive(Parser)]
#[command(name = "mallorn", version, about = "Format and validate mallorn data notation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read forms and reprint them canonically
    Fmt {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,

        /// Break nested collections across lines
        #[arg(long)]
        pretty: bool,
    },

    /// Validate syntax, reporting the first error with its position
    Check {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Fmt { file, pretty: use_pretty } => {
            let (source, text) = read_input(file.as_deref())?;
            let forms = read_all_str(&text)
                .with_context(|| format!("cannot parse {source}"))?;
            for form in &forms {
                if use_pretty {
                    println!("{}", pretty(form));
                } else {
                    println!("{form}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file } => {
            let (source, text) = read_input(file.as_deref())?;
            match read_all_str(&text) {
                Ok(forms) => {
                    println!("{source}: {} form(s) ok", forms.len());
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    eprintln!("{source}: {err}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

/// Read the whole input, naming its source for messages.
fn read_input(file: Option<&std::path::Path>) -> Result<(String, String)> {
    match file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("cannot read stdin")?;
            Ok(("<stdin>".to_string(), text))
        }
    }
}
