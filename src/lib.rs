pub mod cli;
pub mod config;
pub mod error;
pub mod rewriter;
pub mod selection;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, Command, OutputFormat, PopRequest};
pub use config::{CliOverrides, Config, PopConfig, RandomConfig, WriteConfig};
pub use error::{PopLinesError, Result, UserFriendlyError};

// Core functionality re-exports
pub use rewriter::{read_lines, LineRewriter, PopOutcome, WriteStrategy};
pub use selection::{PopMode, PopSpec, Selection};
pub use ui::{OutputFormatter, OutputMode};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use std::time::Instant;

/// Main library interface: configuration, random source, and output
/// wired together for repeated pops.
pub struct PopLines {
    config: Config,
    rewriter: LineRewriter,
    rng: StdRng,
    output_formatter: OutputFormatter,
}

impl PopLines {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let rewriter = LineRewriter::new()
            .with_save_changes(config.pop.save_changes)
            .with_strategy(config.write_strategy());
        let rng = match config.random.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            rewriter,
            rng,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
        }
    }

    /// Create PopLines instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Ok(Self::new(
            config,
            cli_args.output_format.output_mode(),
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Pop (or peek, per configuration) the lines `spec` selects from `path`.
    pub fn pop<P: AsRef<Path>>(&mut self, spec: &PopSpec, path: P) -> Result<PopOutcome> {
        let path = path.as_ref();
        let start_time = Instant::now();

        self.output_formatter.debug(&format!(
            "{} {} from {}",
            if self.rewriter.saves_changes() { "Popping" } else { "Peeking" },
            spec,
            path.display()
        ));

        let outcome = self.rewriter.pop(spec, path, &mut self.rng)?;

        self.output_formatter
            .print_pop_summary(&outcome, start_time.elapsed());

        Ok(outcome)
    }

    pub fn run_request(&mut self, request: &PopRequest) -> Result<PopOutcome> {
        self.pop(&request.spec, &request.file)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let path = output_path.as_ref();
        std::fs::write(path, Config::create_sample_config()).map_err(|e| {
            PopLinesError::Config {
                message: format!("Failed to write config file {}: {}", path.display(), e),
            }
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &PopLinesError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Removes (or with `save_changes == false`, just reads) the lines `spec`
/// selects and returns them.
///
/// # Errors
///
/// I/O failures on `path`. Parameter errors cannot occur here: they are
/// raised when the [`PopSpec`] is built.
pub fn select_and_pop<P, R>(
    spec: &PopSpec,
    path: P,
    save_changes: bool,
    rng: &mut R,
) -> Result<Vec<String>>
where
    P: AsRef<Path>,
    R: Rng + ?Sized,
{
    let outcome = LineRewriter::new()
        .with_save_changes(save_changes)
        .pop(spec, path.as_ref(), rng)?;
    Ok(outcome.extracted)
}

fn pop_with_entropy<P: AsRef<Path>>(spec: Result<PopSpec>, path: P) -> Result<Vec<String>> {
    select_and_pop(&spec?, path, true, &mut StdRng::from_entropy())
}

/// Pops `num_lines` from the head of a file.
pub fn pop_head<P: AsRef<Path>>(num_lines: i64, path: P) -> Result<Vec<String>> {
    pop_with_entropy(PopSpec::head(num_lines), path)
}

/// Pops `num_lines` from the tail of a file.
pub fn pop_tail<P: AsRef<Path>>(num_lines: i64, path: P) -> Result<Vec<String>> {
    pop_with_entropy(PopSpec::tail(num_lines), path)
}

/// Pops `num_lines` from random positions, returned shuffled.
pub fn pop_random<P: AsRef<Path>>(num_lines: i64, path: P) -> Result<Vec<String>> {
    pop_with_entropy(PopSpec::random(num_lines), path)
}

/// Pops an inclusive 1-origin range.
pub fn pop_range<P: AsRef<Path>>(
    start: i64,
    stop: i64,
    step: i64,
    path: P,
) -> Result<Vec<String>> {
    pop_with_entropy(PopSpec::range(start, stop, Some(step)), path)
}

/// Pops specific 1-origin line numbers.
pub fn pop_these<P: AsRef<Path>>(line_numbers: &[i64], path: P) -> Result<Vec<String>> {
    pop_with_entropy(PopSpec::specific(line_numbers.iter().copied()), path)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
