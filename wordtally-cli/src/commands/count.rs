//! Word counting command implementation

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::input::FileReader;
use crate::output::{create_formatter, write_ranked, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::Context;
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use wordtally_core::{Config, Normalization, Pipeline, StopWordSource, TrailingRowPolicy};

/// Message shown when no input file is given
pub const MISSING_INPUT: &str = "Path to delimited input file required.";

/// Arguments for counting words
#[derive(Debug, Args)]
pub struct CountArgs {
    /// Delimited input file whose first row is the header
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Column holding the response text [default: "Text Response"]
    #[arg(long, value_name = "NAME")]
    pub field: Option<String>,

    /// Column delimiter as a regular expression [default: \t]
    #[arg(long, value_name = "REGEX")]
    pub column_delimiter: Option<String>,

    /// Row delimiter; \n, \r\n and \t escapes are understood
    #[arg(long, value_name = "STR")]
    pub row_delimiter: Option<String>,

    /// Read size in KB [default: 64]
    #[arg(long, value_name = "KB")]
    pub chunk_kb: Option<usize>,

    /// What to do with a truncated final row: drop, emit or error [default: drop]
    #[arg(long, value_name = "POLICY")]
    pub trailing_row: Option<TrailingRowPolicy>,

    /// How tokens are normalized: alphanumeric or alphanumeric-hyphen-apostrophe
    /// [default: alphanumeric]
    #[arg(long, value_name = "POLICY")]
    pub normalization: Option<Normalization>,

    /// Newline-delimited stop-word file [default: stopwords.txt]
    #[arg(long, value_name = "FILE", conflicts_with = "builtin_stop_words")]
    pub stop_words: Option<PathBuf>,

    /// Use the bundled English stop-word list
    #[arg(long)]
    pub builtin_stop_words: bool,

    /// Only show the N most frequent words
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output and logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CountArgs {
    /// Execute the count command
    pub fn execute(&self) -> CliResult<()> {
        // Initialize logging based on verbosity
        self.init_logging();

        let input = self
            .input
            .as_deref()
            .ok_or_else(|| CliError::MissingArgument(MISSING_INPUT.to_string()))?;

        let file_config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let config = self.build_config(&file_config)?;
        log::debug!("Configuration: {:?}", config);

        let file = FileReader::open(input)?;
        let progress = ProgressReporter::new(FileReader::file_size(input)?, self.quiet);
        progress.set_stage("counting words");

        log::info!("Counting words in {}", input.display());
        let report = Pipeline::new(config)
            .run_reader(progress.wrap_read(file))
            .with_context(|| format!("Failed to process {}", input.display()));
        progress.finish();
        let report = report?;

        let format = self
            .format
            .or(file_config.output.format)
            .unwrap_or_default();
        let pretty_json = file_config.output.pretty_json.unwrap_or(true);
        self.write_output(format, pretty_json, &report.words)?;

        log::info!("Wrote {} ranked words", report.words.len());
        Ok(())
    }

    /// Merge flags, config file and defaults into a pipeline configuration
    pub fn build_config(&self, file: &CliConfig) -> CliResult<Config> {
        let mut builder = Config::builder();

        if let Some(field) = self.field.as_ref().or(file.input.field.as_ref()) {
            builder = builder.target_field(field.as_str());
        }
        if let Some(pattern) = self
            .column_delimiter
            .as_ref()
            .or(file.input.column_delimiter.as_ref())
        {
            builder = builder.column_delimiter(pattern.as_str());
        }
        match (&self.row_delimiter, &file.input.row_delimiter) {
            (Some(flag), _) => builder = builder.row_delimiter(unescape_delimiter(flag)),
            (None, Some(configured)) => builder = builder.row_delimiter(configured.as_str()),
            (None, None) => {}
        }
        if let Some(kb) = self.chunk_kb.or(file.input.chunk_kb) {
            let bytes = kb.checked_mul(1024).ok_or_else(|| {
                CliError::ConfigError(format!("chunk size of {kb} KB is too large"))
            })?;
            builder = builder.chunk_size(bytes);
        }
        if let Some(policy) = self.trailing_row.or(file.input.trailing_row) {
            builder = builder.trailing_row(policy);
        }
        if let Some(normalization) = self.normalization.or(file.processing.normalization) {
            builder = builder.normalization(normalization);
        }
        if let Some(source) = self.stop_word_source(file) {
            builder = builder.stop_words(source);
        }
        if let Some(top) = self.top.or(file.processing.top) {
            builder = builder.top(Some(top));
        }

        builder
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    fn stop_word_source(&self, file: &CliConfig) -> Option<StopWordSource> {
        if self.builtin_stop_words {
            return Some(StopWordSource::Builtin);
        }
        if let Some(path) = &self.stop_words {
            return Some(StopWordSource::file(path));
        }
        if file.processing.builtin_stop_words == Some(true) {
            return Some(StopWordSource::Builtin);
        }
        file.processing.stop_words.as_ref().map(StopWordSource::file)
    }

    fn write_output(
        &self,
        format: OutputFormat,
        pretty_json: bool,
        words: &[wordtally_core::WordEntry],
    ) -> CliResult<()> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(create_output(path)?)),
            None => Box::new(io::stdout()),
        };

        let mut formatter = create_formatter(format, writer, pretty_json);
        write_ranked(formatter.as_mut(), words)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A second call in the same process keeps the first logger
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

fn create_output(path: &Path) -> CliResult<File> {
    File::create(path).with_context(|| format!("Failed to create output file: {}", path.display()))
}

/// Replace `\n`, `\r` and `\t` escapes typed on the command line
pub fn unescape_delimiter(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
