//! Command-line surface.
//!
//! Two positional paths, both given or both omitted. When both are omitted
//! they are asked for on stdin; anything else is a usage error.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use thiserror::Error;

use crate::lifecycle::startup::{EXIT_OK, EXIT_PROMPT, EXIT_USAGE};
use crate::lifecycle::BatchRequest;

const AFTER_HELP: &str = "\
KEYPAIR must be a file containing your public/private keypair as an array of JSON integers.
BATCH must be a CSV file containing entries of all the desired transfers in the format:

    AMOUNT,SPL_TOKEN_ADDRESS,RECIPIENT_WALLET_ADDRESS

The first record in BATCH is ignored as it is assumed to be column info.
Run without arguments to be prompted for both paths.";

#[derive(Debug, Parser)]
#[command(name = "spl-batch-transfer")]
#[command(version, about = "Send SPL tokens to every recipient in a CSV file", long_about = None)]
#[command(disable_help_flag = true, after_help = AFTER_HELP)]
pub struct Cli {
    /// Keypair file paying for the transfers
    pub keypair: Option<PathBuf>,

    /// Batch CSV file
    pub batch: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for the run log (overrides run_log.directory)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Print usage
    #[arg(short = '?', short_alias = 'h', long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,
}

/// How the run's paths are obtained.
#[derive(Debug, Clone)]
pub enum Paths {
    Provided(BatchRequest),
    Interactive,
    /// Only one of the two paths was given.
    Partial,
}

/// The paths could not be obtained.
#[derive(Debug, Error)]
pub enum PathsError {
    #[error("KEYPAIR and BATCH must be given together")]
    Partial,

    #[error("unable to get filenames from user")]
    Prompt,
}

impl PathsError {
    pub fn exit_code(&self) -> u8 {
        match self {
            PathsError::Partial => EXIT_USAGE,
            PathsError::Prompt => EXIT_PROMPT,
        }
    }
}

/// Process exit status when clap stops before a [`Cli`] is built.
///
/// `--version` is the only early stop that counts as success; help and
/// every argument error are usage errors.
pub fn exit_for(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayVersion => EXIT_OK,
        _ => EXIT_USAGE,
    }
}

impl Paths {
    /// Turn into a request, asking on `input` when no paths were given.
    pub fn resolve<I: BufRead, O: Write>(
        self,
        input: &mut I,
        output: &mut O,
    ) -> Result<BatchRequest, PathsError> {
        match self {
            Paths::Provided(request) => Ok(request),
            Paths::Partial => Err(PathsError::Partial),
            Paths::Interactive => match prompt_paths(input, output) {
                Ok(Some(request)) => Ok(request),
                Ok(None) | Err(_) => Err(PathsError::Prompt),
            },
        }
    }
}

impl Cli {
    pub fn paths(&self) -> Paths {
        match (&self.keypair, &self.batch) {
            (Some(keypair), Some(batch)) => Paths::Provided(BatchRequest {
                keypair: keypair.clone(),
                batch: batch.clone(),
            }),
            (None, None) => Paths::Interactive,
            _ => Paths::Partial,
        }
    }
}

/// Ask for both paths. Returns `None` if input ends first.
pub fn prompt_paths<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
) -> io::Result<Option<BatchRequest>> {
    let Some(keypair) = prompt(input, output, "input path of keypair JSON file: ")? else {
        return Ok(None);
    };
    let Some(batch) = prompt(input, output, "input path of batch CSV file:    ")? else {
        return Ok(None);
    };
    Ok(Some(BatchRequest {
        keypair: keypair.into(),
        batch: batch.into(),
    }))
}

fn prompt<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
    question: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::startup::EXIT_TOOL_NOT_FOUND;

    #[test]
    fn test_two_positionals() {
        let cli = Cli::try_parse_from(["spl-batch-transfer", "id.json", "batch.csv"]).unwrap();
        match cli.paths() {
            Paths::Provided(req) => {
                assert_eq!(req.keypair, PathBuf::from("id.json"));
                assert_eq!(req.batch, PathBuf::from("batch.csv"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_no_arguments_prompts() {
        let cli = Cli::try_parse_from(["spl-batch-transfer"]).unwrap();
        assert!(matches!(cli.paths(), Paths::Interactive));
    }

    #[test]
    fn test_single_argument_is_partial() {
        let cli = Cli::try_parse_from(["spl-batch-transfer", "id.json"]).unwrap();
        assert!(matches!(cli.paths(), Paths::Partial));
    }

    #[test]
    fn test_extra_argument_rejected() {
        let err = Cli::try_parse_from(["spl-batch-transfer", "a", "b", "c"]).unwrap_err();
        assert_ne!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_help_flags() {
        for flag in ["-?", "-h", "--help"] {
            let err = Cli::try_parse_from(["spl-batch-transfer", flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp, "flag {flag}");
        }
    }

    #[test]
    fn test_usage_errors_exit_one() {
        for args in [
            vec!["spl-batch-transfer", "-?"],
            vec!["spl-batch-transfer", "--help"],
            vec!["spl-batch-transfer", "a", "b", "c"],
            vec!["spl-batch-transfer", "--bogus"],
        ] {
            let err = Cli::try_parse_from(&args).unwrap_err();
            assert_eq!(exit_for(&err), EXIT_USAGE, "args {args:?}");
        }
        assert_ne!(EXIT_USAGE, EXIT_OK);
        assert_ne!(EXIT_USAGE, EXIT_TOOL_NOT_FOUND);
    }

    #[test]
    fn test_version_exits_zero() {
        let err = Cli::try_parse_from(["spl-batch-transfer", "--version"]).unwrap_err();
        assert_eq!(exit_for(&err), EXIT_OK);
    }

    #[test]
    fn test_single_argument_resolves_to_usage_error() {
        let cli = Cli::try_parse_from(["spl-batch-transfer", "a"]).unwrap();
        let mut input = "never-read.json\n".as_bytes();
        let mut output = Vec::new();
        let err = cli.paths().resolve(&mut input, &mut output).unwrap_err();
        assert!(matches!(err, PathsError::Partial));
        assert_eq!(err.exit_code(), EXIT_USAGE);
        assert!(output.is_empty());
    }

    #[test]
    fn test_prompt_eof_resolves_to_prompt_error() {
        let cli = Cli::try_parse_from(["spl-batch-transfer"]).unwrap();
        let mut input = "id.json\n".as_bytes();
        let mut output = Vec::new();
        let err = cli.paths().resolve(&mut input, &mut output).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_PROMPT);
    }

    #[test]
    fn test_provided_paths_resolve_without_prompting() {
        let cli = Cli::try_parse_from(["spl-batch-transfer", "id.json", "b.csv"]).unwrap();
        let mut output = Vec::new();
        let req = cli
            .paths()
            .resolve(&mut "".as_bytes(), &mut output)
            .unwrap();
        assert_eq!(req.batch, PathBuf::from("b.csv"));
        assert!(output.is_empty());
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "spl-batch-transfer",
            "--config",
            "batch.toml",
            "--log-dir",
            "/tmp/logs",
            "id.json",
            "batch.csv",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("batch.toml")));
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn test_prompt_paths() {
        let mut input = "/home/op/id.json\n  batch.csv \r\n".as_bytes();
        let mut output = Vec::new();
        let req = prompt_paths(&mut input, &mut output).unwrap().unwrap();
        assert_eq!(req.keypair, PathBuf::from("/home/op/id.json"));
        assert_eq!(req.batch, PathBuf::from("batch.csv"));
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with("input path of keypair JSON file: "));
        assert!(shown.ends_with("input path of batch CSV file:    "));
    }

    #[test]
    fn test_prompt_eof() {
        let mut input = "only-one.json\n".as_bytes();
        let mut output = Vec::new();
        assert!(prompt_paths(&mut input, &mut output).unwrap().is_none());
    }
}
