//! Location parsing for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::models::lsp::Position;

/// `tree.json:line[:column]`, 1-indexed
#[derive(Debug, Clone)]
pub struct ParsedLocation {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl ParsedLocation {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            bail!("Location cannot be empty");
        }

        let (file_part, rest) = Self::split_path_and_position(input)?;
        let file = PathBuf::from(file_part);
        let (line, column) = Self::parse_position(rest)?;

        Ok(Self { file, line, column })
    }

    fn split_path_and_position(input: &str) -> Result<(&str, &str)> {
        let is_windows = input.len() > 2
            && input.as_bytes().get(1) == Some(&b':')
            && input.as_bytes().first().map(|b| b.is_ascii_alphabetic()) == Some(true);
        let search_start = if is_windows { 2 } else { 0 };

        let split = input[search_start..]
            .char_indices()
            .filter(|&(_, ch)| ch == ':')
            .map(|(i, _)| search_start + i)
            .find(|&pos| {
                input[pos + 1..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_digit() || c == '-')
            });

        let Some(split_pos) = split else {
            bail!(
                "Invalid location format. Expected: file:line[:column]\nExample: tree.json:10:5"
            )
        };
        if input[split_pos + 1..].starts_with('-') {
            bail!(
                "Invalid line number: negative values not allowed. Line numbers are 1-indexed positive integers.\nExample: tree.json:10:5"
            )
        }

        Ok((&input[..split_pos], &input[split_pos + 1..]))
    }

    fn parse_position(rest: &str) -> Result<(u32, u32)> {
        let mut parts = rest.splitn(2, ':');

        let line_str = parts.next().unwrap_or("");
        let line: u32 = line_str.parse().map_err(|_| {
            anyhow::anyhow!(
                "Invalid line number '{}': must be a positive integer (1-indexed)",
                line_str
            )
        })?;

        let column: u32 = match parts.next() {
            Some(col_str) => col_str.parse().map_err(|_| {
                anyhow::anyhow!(
                    "Invalid column number '{}': must be a positive integer (1-indexed)",
                    col_str
                )
            })?,
            None => 1,
        };

        if line == 0 {
            bail!("Line number must be >= 1 (got 0). Line numbers are 1-indexed.");
        }
        if column == 0 {
            bail!("Column number must be >= 1 (got 0). Column numbers are 1-indexed.");
        }

        Ok((line, column))
    }

    /// Resolve the file against the working directory
    pub fn to_absolute(&self) -> Result<Self> {
        let file = if self.file.is_absolute() {
            self.file.clone()
        } else {
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(&self.file)
        };
        let canonical = file
            .canonicalize()
            .map_err(|_| anyhow::anyhow!("File not found: {}", file.display()))?;

        Ok(Self {
            file: canonical,
            line: self.line,
            column: self.column,
        })
    }

    /// 0-indexed position for the analyzer
    pub fn position(&self) -> Position {
        Position::from_cli(self.line, self.column)
    }

    /// Check the position against the document text
    pub fn validate_position_with_content(&self, content: &str) -> Result<()> {
        let lines: Vec<&str> = content.lines().collect();
        let line_count = lines.len().max(1);

        if self.line as usize > line_count {
            bail!(
                "Line {} exceeds file length ({} lines)",
                self.line,
                line_count
            );
        }

        if let Some(line_content) = lines.get((self.line - 1) as usize) {
            let col_max = line_content.len() + 1;
            if self.column as usize > col_max {
                bail!(
                    "Column {} exceeds line length ({} chars) at line {}",
                    self.column,
                    line_content.len(),
                    self.line
                );
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for ParsedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}
