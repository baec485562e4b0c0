use std::fmt;

/// A source location: file name plus 1-based line and column.
///
/// Displays as `source:line:col`. A zero line prints only the source and a
/// zero column omits the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCol {
    pub source: String,
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)?;
        if self.line == 0 {
            return Ok(());
        }
        write!(f, ":{}", self.line)?;
        if self.col > 0 {
            write!(f, ":{}", self.col)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, col: usize) -> LineCol {
        LineCol {
            source: "expr.m".into(),
            line,
            col,
        }
    }

    #[test]
    fn display_forms() {
        assert_eq!(at(3, 7).to_string(), "expr.m:3:7");
        assert_eq!(at(3, 0).to_string(), "expr.m:3");
        assert_eq!(at(0, 7).to_string(), "expr.m");
    }
}
