//! CLI command implementations

use crate::error::CliResult;
use clap::Parser;

pub mod count;

pub use count::CountArgs;

/// Rank the words of free-text survey responses by frequency
#[derive(Debug, Parser)]
#[command(name = "wordtally", version, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub count: CountArgs,
}

impl Cli {
    /// Run the command line
    pub fn execute(&self) -> CliResult<()> {
        self.count.execute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_input_and_output() {
        let cli = Cli::try_parse_from(["wordtally", "in.tsv", "out.txt", "-f", "json"]).unwrap();
        assert_eq!(cli.count.input, Some(PathBuf::from("in.tsv")));
        assert_eq!(cli.count.output, Some(PathBuf::from("out.txt")));
        assert_eq!(cli.count.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_input_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["wordtally"]).unwrap();
        assert!(cli.count.input.is_none());
        assert_eq!(cli.count.verbose, 0);
    }

    #[test]
    fn test_repeated_verbose_flag() {
        let cli = Cli::try_parse_from(["wordtally", "-vvv", "in.tsv"]).unwrap();
        assert_eq!(cli.count.verbose, 3);
    }

    #[test]
    fn test_stop_word_sources_conflict() {
        let result = Cli::try_parse_from([
            "wordtally",
            "in.tsv",
            "--stop-words",
            "stop.txt",
            "--builtin-stop-words",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["wordtally", "in.tsv", "-f", "yaml"]).is_err());
    }
}
