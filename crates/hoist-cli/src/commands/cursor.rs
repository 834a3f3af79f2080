//! `LINE:COL` cursor positions.

use std::fmt;

/// 1-based line and column; the column counts chars, as editors do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    /// Byte offset of this position in `source`.
    ///
    /// The column may point one past the last char of its line.
    pub fn to_offset(self, source: &str) -> Option<usize> {
        let mut line_start = 0;
        for _ in 1..self.line {
            line_start += source[line_start..].find('\n')? + 1;
        }

        let line = source[line_start..].split('\n').next().unwrap_or_default();
        let mut chars = line.char_indices().map(|(i, _)| i).chain([line.len()]);
        chars.nth(self.column.checked_sub(1)?).map(|i| line_start + i)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Value parser for `--at`.
pub fn parse_cursor(s: &str) -> Result<Cursor, String> {
    let (line, column) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got '{}'", s))?;
    let parse = |part: &str, what: &str| match part.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{} must be a positive number, got '{}'", what, part)),
    };

    Ok(Cursor {
        line: parse(line, "line")?,
        column: parse(column, "column")?,
    })
}
