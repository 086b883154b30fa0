use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::selection::PopSpec;
use crate::ui::{OutputFormatter, OutputMode};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "poplines")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pop or peek lines from a file, turning it into a queue")]
#[command(
    long_about = "poplines removes lines from the head, the tail, random positions, a range, \
                  or specific line numbers of a file and prints them to stdout. \
                  With --peek the file is left untouched."
)]
#[command(after_help = "EXAMPLES:\n  \
    poplines head jobs.txt                 # pop the first line\n  \
    poplines tail jobs.txt -n 3            # pop the last three lines\n  \
    poplines --peek head jobs.txt -n -2    # show all but the last two lines\n  \
    poplines random jobs.txt -n 5 --keep-ordered\n  \
    poplines range jobs.txt 3 -1           # third line through the last\n  \
    poplines these jobs.txt 1,5,-1         # first, fifth, and last lines")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print the selected lines without removing them from the file
    #[arg(long, global = true)]
    pub peek: bool,

    /// Seed for random selection (reproducible output)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Rewrite the file in place instead of replacing it atomically
    #[arg(long, global = true)]
    pub in_place: bool,

    /// Configuration file path
    #[arg(short, long, global = true, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress diagnostics)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Pop lines from the top of a file
    #[command(allow_negative_numbers = true)]
    Head {
        file: PathBuf,

        /// Number of lines; negative means all but the last N
        #[arg(short = 'n', long = "num", default_value_t = 1)]
        count: i64,
    },

    /// Pop lines from the bottom of a file
    #[command(allow_negative_numbers = true)]
    Tail {
        file: PathBuf,

        /// Number of lines; negative means all but the first N
        #[arg(short = 'n', long = "num", default_value_t = 1)]
        count: i64,
    },

    /// Pop lines from random positions
    #[command(allow_negative_numbers = true)]
    Random {
        file: PathBuf,

        /// Number of lines
        #[arg(short = 'n', long = "num", default_value_t = 1)]
        count: i64,

        /// Output the picked lines in file order instead of shuffled
        #[arg(short = 'o', long)]
        keep_ordered: bool,
    },

    /// Pop an inclusive, 1-origin range of lines
    #[command(allow_negative_numbers = true)]
    Range {
        file: PathBuf,

        /// First line (negative counts from the end)
        start: i64,

        /// Last line, inclusive (negative counts from the end)
        stop: i64,

        /// Take every STEP-th line of the range
        step: Option<i64>,
    },

    /// Pop specific 1-origin line numbers
    #[command(visible_alias = "specific", allow_negative_numbers = true)]
    These {
        file: PathBuf,

        /// Line numbers (space or comma separated; negative counts from the end)
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        lines: Vec<i64>,
    },

    /// Generate a sample configuration file
    GenerateConfig {
        /// Where to write it
        #[arg(default_value = "poplines.toml")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Lines on stdout, colored diagnostics on stderr
    Human,
    /// JSON formatted output
    Json,
    /// Lines on stdout, plain diagnostics on stderr
    Plain,
}

impl OutputFormat {
    pub fn output_mode(&self) -> OutputMode {
        match self {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

/// A parsed pop invocation: what to select, and from which file.
#[derive(Debug, Clone)]
pub struct PopRequest {
    pub spec: PopSpec,
    pub file: PathBuf,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let keep_ordered = matches!(
            self.command,
            Command::Random {
                keep_ordered: true,
                ..
            }
        );

        CliOverrides::new()
            .with_peek(self.peek)
            .with_keep_ordered(keep_ordered)
            .with_seed(self.seed)
            .with_in_place(self.in_place)
    }

    /// Validates the subcommand's parameters. `None` for commands that do
    /// not pop anything.
    pub fn pop_request(&self, config: &Config) -> Result<Option<PopRequest>> {
        let (spec, file) = match &self.command {
            Command::Head { file, count } => (PopSpec::head(*count)?, file),
            Command::Tail { file, count } => (PopSpec::tail(*count)?, file),
            Command::Random { file, count, .. } => (
                PopSpec::random_with_order(*count, config.random.keep_ordered)?,
                file,
            ),
            Command::Range {
                file,
                start,
                stop,
                step,
            } => (PopSpec::range(*start, *stop, *step)?, file),
            Command::These { file, lines } => {
                (PopSpec::specific(lines.iter().copied())?, file)
            }
            Command::GenerateConfig { .. } => return Ok(None),
        };

        Ok(Some(PopRequest {
            spec,
            file: file.clone(),
        }))
    }

    pub fn output_formatter(&self) -> OutputFormatter {
        OutputFormatter::new(
            self.output_format.output_mode(),
            self.verbosity_level(),
            self.quiet,
        )
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
