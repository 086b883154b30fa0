use crate::error::{PopLinesError, Result};
use crate::selection::{self, join_lines, split_lines, PopMode, PopSpec};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// How the retained lines are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteStrategy {
    /// Write a sibling temp file and rename it over the source.
    #[default]
    Atomic,
    /// Truncate and rewrite the source file itself.
    InPlace,
}

/// Result of a single pop or peek.
#[derive(Debug, Clone, Serialize)]
pub struct PopOutcome {
    pub path: PathBuf,
    pub mode: PopMode,
    pub selection: String,
    pub saved: bool,
    pub total_lines: usize,
    pub retained_lines: usize,
    pub extracted: Vec<String>,
}

impl PopOutcome {
    /// Extracted lines as they are printed: newline separated, with a final
    /// newline when anything was extracted.
    pub fn output_text(&self) -> String {
        join_lines(&self.extracted)
    }

    pub fn display_summary(&self) -> String {
        format!(
            "{} line(s) of {} selected from {} ({}), {} remaining{}",
            self.extracted.len(),
            self.total_lines,
            self.path.display(),
            self.selection,
            self.retained_lines,
            if self.saved { "" } else { " [peek, file unchanged]" }
        )
    }
}

pub struct LineRewriter {
    save_changes: bool,
    strategy: WriteStrategy,
}

impl LineRewriter {
    pub fn new() -> Self {
        Self {
            save_changes: true,
            strategy: WriteStrategy::Atomic,
        }
    }

    /// `false` turns a pop into a peek.
    pub fn with_save_changes(mut self, save_changes: bool) -> Self {
        self.save_changes = save_changes;
        self
    }

    pub fn with_strategy(mut self, strategy: WriteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn saves_changes(&self) -> bool {
        self.save_changes
    }

    /// Reads `path`, selects lines per `spec`, and unless peeking writes the
    /// retained lines back.
    pub fn pop<R: Rng + ?Sized>(
        &self,
        spec: &PopSpec,
        path: &Path,
        rng: &mut R,
    ) -> Result<PopOutcome> {
        let lines = read_lines(path)?;
        let total_lines = lines.len();

        let selection = selection::select(spec, lines, rng);

        if self.save_changes {
            self.write_lines(path, &selection.retained)?;
        }

        Ok(PopOutcome {
            path: path.to_path_buf(),
            mode: spec.mode(),
            selection: spec.to_string(),
            saved: self.save_changes,
            total_lines,
            retained_lines: selection.retained.len(),
            extracted: selection.extracted,
        })
    }

    pub fn write_lines(&self, path: &Path, lines: &[String]) -> Result<()> {
        let content = join_lines(lines);

        let written = match self.strategy {
            WriteStrategy::Atomic => write_atomic(path, content.as_bytes()),
            WriteStrategy::InPlace => fs::write(path, content.as_bytes()),
        };

        written.map_err(|e| PopLinesError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}

impl Default for LineRewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the whole file and splits it into lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let display = || path.display().to_string();

    match fs::metadata(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PopLinesError::NotFound { path: display() });
        }
        Err(e) => {
            return Err(PopLinesError::Read {
                path: display(),
                source: e,
            });
        }
        Ok(metadata) if !metadata.is_file() => {
            return Err(PopLinesError::NotAFile { path: display() });
        }
        Ok(_) => {}
    }

    let content = fs::read_to_string(path).map_err(|e| PopLinesError::Read {
        path: display(),
        source: e,
    })?;

    Ok(split_lines(&content))
}

fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    // Replace the symlink target, not the link.
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let permissions = fs::metadata(&target).map(|m| m.permissions()).ok();

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }

    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}
