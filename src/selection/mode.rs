use crate::error::{PopLinesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{NonZeroI64, NonZeroUsize};
use std::str::FromStr;

/// The ways lines can be picked out of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopMode {
    /// Remove from the top
    Head,
    /// Remove from the bottom
    Tail,
    /// Remove from random positions
    Random,
    /// Remove an inclusive 1-origin range, optionally strided
    Range,
    /// Remove specific 1-origin line numbers
    These,
}

impl PopMode {
    pub const NAMES: &'static [&'static str] = &["head", "tail", "random", "range", "these"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PopMode::Head => "head",
            PopMode::Tail => "tail",
            PopMode::Random => "random",
            PopMode::Range => "range",
            PopMode::These => "these",
        }
    }
}

impl FromStr for PopMode {
    type Err = PopLinesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "head" => Ok(PopMode::Head),
            "tail" => Ok(PopMode::Tail),
            "random" => Ok(PopMode::Random),
            "range" => Ok(PopMode::Range),
            "these" | "specific" => Ok(PopMode::These),
            other => Err(PopLinesError::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PopMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated selection request.
///
/// The non-zero wrappers keep the 1-origin contract in the types: a spec
/// that exists has already passed validation, so the selection code never
/// needs to re-check it. Build one through the constructors below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopSpec {
    /// Positive: the first `count` lines. Negative: all but the last `|count|`.
    Head { count: NonZeroI64 },
    /// Positive: the last `count` lines. Negative: all but the first `|count|`.
    Tail { count: NonZeroI64 },
    Random {
        count: NonZeroUsize,
        keep_ordered: bool,
    },
    /// Inclusive on both ends. Negative bounds count back from the end.
    Range {
        start: NonZeroI64,
        stop: NonZeroI64,
        step: NonZeroUsize,
    },
    Specific { lines: Vec<NonZeroI64> },
}

impl PopSpec {
    pub fn head(count: i64) -> Result<Self> {
        Ok(PopSpec::Head {
            count: nonzero_count(count)?,
        })
    }

    pub fn tail(count: i64) -> Result<Self> {
        Ok(PopSpec::Tail {
            count: nonzero_count(count)?,
        })
    }

    pub fn random(count: i64) -> Result<Self> {
        Self::random_with_order(count, false)
    }

    pub fn random_with_order(count: i64, keep_ordered: bool) -> Result<Self> {
        let count = usize::try_from(count)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| {
                PopLinesError::invalid_parameter("Number of lines must be a positive integer.")
            })?;

        Ok(PopSpec::Random {
            count,
            keep_ordered,
        })
    }

    pub fn range(start: i64, stop: i64, step: Option<i64>) -> Result<Self> {
        let step = step.unwrap_or(1);
        let step = usize::try_from(step)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| PopLinesError::invalid_parameter("Step must be an integer > 0"))?;

        let start = NonZeroI64::new(start).ok_or_else(|| {
            PopLinesError::invalid_parameter(
                "Invalid start for \"range\" pop mode. Must be 1-origin. 0 was provided.",
            )
        })?;

        let stop = NonZeroI64::new(stop).ok_or_else(|| {
            PopLinesError::invalid_parameter(
                "Invalid end for \"range\" pop mode. Must be 1-origin. 0 was provided.",
            )
        })?;

        Ok(PopSpec::Range { start, stop, step })
    }

    /// Builds a range from `(start, stop)` or `(start, stop, step)`.
    pub fn range_from_slice(bounds: &[i64]) -> Result<Self> {
        match *bounds {
            [start, stop] => Self::range(start, stop, None),
            [start, stop, step] => Self::range(start, stop, Some(step)),
            _ => Err(PopLinesError::invalid_parameter(
                "Wrong number of arguments for \"range\" pop mode. Should be 1-origin inclusive (start, stop) or (start, stop, step)",
            )),
        }
    }

    pub fn specific<I>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let lines = lines
            .into_iter()
            .map(|line| {
                NonZeroI64::new(line).ok_or_else(|| {
                    PopLinesError::invalid_parameter(
                        "Specific line numbers are 1-origin. 0 was given.",
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PopSpec::Specific { lines })
    }

    /// Parses a mode name and its raw text arguments.
    ///
    /// `head`, `tail`, and `random` take an optional count (default 1);
    /// `random` accepts a second `ordered`/`true`/`false` token. `range`
    /// takes two or three integers. `these` takes line numbers, either as
    /// separate arguments or comma separated.
    pub fn from_args<S: AsRef<str>>(mode: &str, args: &[S]) -> Result<Self> {
        let mode: PopMode = mode.parse()?;
        let args: Vec<&str> = args.iter().map(|a| a.as_ref().trim()).collect();

        match mode {
            PopMode::Head => Self::head(single_count(&args)?),
            PopMode::Tail => Self::tail(single_count(&args)?),
            PopMode::Random => match args.as_slice() {
                [] => Self::random(1),
                [count] => Self::random(parse_count(count)?),
                [count, ordered] => {
                    Self::random_with_order(parse_count(count)?, parse_flag(ordered)?)
                }
                _ => Err(PopLinesError::invalid_parameter(
                    "\"random\" pop mode takes a count and an optional keep-ordered flag",
                )),
            },
            PopMode::Range => {
                let bounds = args
                    .iter()
                    .map(|a| parse_line_number(a))
                    .collect::<Result<Vec<_>>>()?;
                Self::range_from_slice(&bounds)
            }
            PopMode::These => {
                let lines = args
                    .iter()
                    .copied()
                    .flat_map(|a| a.split(','))
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(parse_line_number)
                    .collect::<Result<Vec<_>>>()?;
                Self::specific(lines)
            }
        }
    }

    pub fn mode(&self) -> PopMode {
        match self {
            PopSpec::Head { .. } => PopMode::Head,
            PopSpec::Tail { .. } => PopMode::Tail,
            PopSpec::Random { .. } => PopMode::Random,
            PopSpec::Range { .. } => PopMode::Range,
            PopSpec::Specific { .. } => PopMode::These,
        }
    }
}

impl fmt::Display for PopSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopSpec::Head { count } | PopSpec::Tail { count } => {
                write!(f, "{} {}", self.mode(), count)
            }
            PopSpec::Random {
                count,
                keep_ordered,
            } => {
                write!(f, "random {}", count)?;
                if *keep_ordered {
                    write!(f, " (ordered)")?;
                }
                Ok(())
            }
            PopSpec::Range { start, stop, step } => {
                write!(f, "range {}..={} step {}", start, stop, step)
            }
            PopSpec::Specific { lines } => {
                let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
                write!(f, "these [{}]", lines.join(", "))
            }
        }
    }
}

fn nonzero_count(count: i64) -> Result<NonZeroI64> {
    NonZeroI64::new(count).ok_or_else(|| {
        PopLinesError::invalid_parameter("Number of lines must be a non-zero integer.")
    })
}

fn single_count(args: &[&str]) -> Result<i64> {
    match args {
        [] => Ok(1),
        [count] => parse_count(count),
        _ => Err(PopLinesError::invalid_parameter("Expected a single line count")),
    }
}

fn parse_count(token: &str) -> Result<i64> {
    token.parse().map_err(|_| {
        PopLinesError::invalid_parameter(format!(
            "Number of lines must be an integer, got '{}'",
            token
        ))
    })
}

fn parse_line_number(token: &str) -> Result<i64> {
    token.parse().map_err(|_| {
        PopLinesError::invalid_parameter(format!(
            "Non-integer provided as a line number: '{}'. Should be 1-origin integers.",
            token
        ))
    })
}

fn parse_flag(token: &str) -> Result<bool> {
    match token.to_lowercase().as_str() {
        "ordered" | "true" | "yes" | "1" => Ok(true),
        "unordered" | "false" | "no" | "0" => Ok(false),
        _ => Err(PopLinesError::invalid_parameter(format!(
            "Expected a keep-ordered flag (true/false), got '{}'",
            token
        ))),
    }
}
