//! Comment stripping, one line at a time
//!
//! `//` discards the rest of the line. `/* ... */` may span several lines, so
//! the [`Preprocessor`] remembers whether the previous line ended inside a
//! block comment. Call [`Preprocessor::finish`] after the last line to detect
//! an unterminated block comment.

use crate::errors::LexError;

const LINE_COMMENT: &str = "//";
const BLOCK_COMMENT_BEGIN: &str = "/*";
const BLOCK_COMMENT_END: &str = "*/";

#[derive(Debug, Default)]
pub struct Preprocessor {
    /// Line on which the currently open block comment began.
    open_comment: Option<usize>,
    line: usize,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_comment(&self) -> bool {
        self.open_comment.is_some()
    }

    /// Returns `line` with every comment removed.
    pub fn preprocess(&mut self, line: &str) -> String {
        self.line += 1;
        let mut stripped = String::with_capacity(line.len());
        let mut rest = line;

        loop {
            if self.open_comment.is_none() {
                let Some((begin, delim)) = find_comment_begin(rest) else {
                    stripped.push_str(rest);
                    break;
                };
                stripped.push_str(&rest[..begin]);
                if delim == LINE_COMMENT {
                    break;
                }
                self.open_comment = Some(self.line);
                rest = &rest[begin + BLOCK_COMMENT_BEGIN.len()..];
            }

            match rest.find(BLOCK_COMMENT_END) {
                Some(end) => {
                    self.open_comment = None;
                    rest = &rest[end + BLOCK_COMMENT_END.len()..];
                }
                None => break,
            }
        }

        stripped
    }

    /// Fails if the input ended inside a block comment.
    pub fn finish(self) -> Result<(), LexError> {
        match self.open_comment {
            Some(line) => Err(LexError::UnterminatedComment { line }),
            None => Ok(()),
        }
    }
}

/// Finds whichever comment opener comes first in `text`.
fn find_comment_begin(text: &str) -> Option<(usize, &'static str)> {
    let line = text.find(LINE_COMMENT).map(|i| (i, LINE_COMMENT));
    let block = text.find(BLOCK_COMMENT_BEGIN).map(|i| (i, BLOCK_COMMENT_BEGIN));

    match (line, block) {
        (Some(l), Some(b)) => Some(if l.0 <= b.0 { l } else { b }),
        (l, b) => l.or(b),
    }
}
