use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};

use authstate::config::parse_max_user_len;
use authstate::wire::{decode_auth_state, encode_auth_state, hex_decode, hex_encode};
use authstate::{AuthMethod, CodecError, ConfigError, ContractConfig, ContractError, Session, Validator};
use clap::{Args, Parser, Subcommand};
use tracing::Level;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{invalid} of {total} documents failed validation")]
    InvalidDocuments { invalid: usize, total: usize },
}

#[derive(Parser, Debug)]
#[command(name = "authstate", about = "Validate and convert auth state documents")]
struct Cli {
    #[arg(long, env = "AUTHSTATE_LOG_LEVEL", default_value = "warn")]
    log_level: Level,

    #[arg(long, value_parser = parse_limit, help = "Overrides AUTHSTATE_MAX_USER_LEN")]
    max_user_len: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every supported authentication method.
    Methods,
    /// Check JSON-lines documents against the contract.
    Validate(ValidateArgs),
    /// Convert a JSON auth state into hex-encoded wire bytes.
    Encode(InputArgs),
    /// Convert hex-encoded wire bytes back into JSON.
    Decode { hex: String },
}

#[derive(Args, Debug)]
struct InputArgs {
    #[arg(long, default_value = "-", help = "Input file path, or - for stdin")]
    input: String,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    source: InputArgs,

    #[arg(long, help = "Treat `null` lines as anonymous sessions")]
    sessions: bool,
}

fn parse_limit(raw: &str) -> Result<usize, ConfigError> {
    parse_max_user_len(Some(raw))
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    let mut config = ContractConfig::from_env()?;
    if let Some(max_user_len) = cli.max_user_len {
        config.max_user_len = max_user_len;
    }
    let validator = Validator::new(config);
    tracing::debug!(max_user_len = validator.config().max_user_len, "contract config loaded");

    let mut out = io::stdout().lock();
    match cli.command {
        Command::Methods => run_methods(&mut out),
        Command::Validate(args) => {
            let reader = open_input(&args.source.input)?;
            run_validate(&validator, reader, args.sessions, &mut out)
        }
        Command::Encode(args) => {
            let reader = open_input(&args.input)?;
            run_encode(&validator, reader, &mut out)
        }
        Command::Decode { hex } => run_decode(&validator, &hex, &mut out),
    }
}

fn open_input(path: &str) -> Result<Box<dyn BufRead>, CliError> {
    if path == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

fn run_methods(out: &mut impl Write) -> Result<(), CliError> {
    for method in AuthMethod::ALL {
        writeln!(out, "{method}")?;
    }
    Ok(())
}

fn run_validate(
    validator: &Validator,
    reader: impl BufRead,
    sessions: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut total = 0;
    let mut invalid = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        total += 1;
        let line_no = index + 1;

        let result = if sessions {
            validator.validate_session_str(&line)
        } else {
            validator.validate_str(&line).map(Session::Authenticated)
        };
        match result {
            Ok(Session::Authenticated(state)) => {
                writeln!(out, "ok {line_no}: {} via {}", state.user(), state.authenticated_by())?;
            }
            Ok(Session::Anonymous) => writeln!(out, "ok {line_no}: anonymous")?,
            Err(e) => {
                invalid += 1;
                writeln!(out, "invalid {line_no}: {e}")?;
            }
        }
    }

    tracing::info!(total, invalid, "validation finished");
    if invalid > 0 {
        return Err(CliError::InvalidDocuments { invalid, total });
    }
    Ok(())
}

fn run_encode(validator: &Validator, mut reader: impl BufRead, out: &mut impl Write) -> Result<(), CliError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    let state = validator.validate_str(&input)?;
    writeln!(out, "{}", hex_encode(&encode_auth_state(&state)))?;
    Ok(())
}

fn run_decode(validator: &Validator, hex: &str, out: &mut impl Write) -> Result<(), CliError> {
    let state = decode_auth_state(&hex_decode(hex)?)?;
    validator.check_limits(&state)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?;
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
