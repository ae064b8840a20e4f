use std::cmp::min;
use std::io::{self, BufRead, Read, Write};

const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";
const LINE_COMMENT: &str = "//";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum State {
    #[default]
    Normal,
    InBlockComment,
}

/// Line-oriented C comment stripper.
///
/// Markers are located with a plain substring search, so string literals are
/// not recognised and every `/*`, `*/` or `//` counts. Rules for a single line:
///
/// 1. `/*` emits the text before it and enters a block comment;
/// 2. `*/` emits the text after it and leaves the block comment;
/// 3. otherwise `//` emits the text before it, in either state;
/// 4. otherwise the line is emitted unchanged outside a block comment
///    and swallowed inside one.
///
/// Rules 1 and 2 both apply to `a /* b */ c`. Rule 3 is skipped whenever
/// rule 2 fired, and rule 1 still fires when `//` precedes `/*`.
#[derive(Default)]
pub struct CommentStripper {
    state: State,
}

impl CommentStripper {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Appends the retained part of `line` to `out`. The line is expected to
    /// carry its own terminator; truncated prefixes drop it.
    pub fn strip_line(&mut self, line: &str, out: &mut String) {
        if let Some(pos) = line.find(BLOCK_OPEN) {
            out.push_str(&line[..pos]);
            self.state = State::InBlockComment;
        }
        match (line.find(BLOCK_CLOSE), line.find(LINE_COMMENT), self.state) {
            (Some(pos), _, _) => {
                out.push_str(&line[pos + BLOCK_CLOSE.len()..]);
                self.state = State::Normal;
            }
            (None, Some(pos), _) => {
                out.push_str(&line[..pos]);
            }
            (None, None, State::Normal) => {
                out.push_str(line);
            }
            (None, None, State::InBlockComment) => {}
        }
    }
}

/**
 * Filter for removing comments from concatenated C sources.
 */
pub struct CommentsRemover<R> {
    r: R,
    stripper: CommentStripper,
    line: String,
    pending: String,
    offset: usize,
    lines: usize,
    swallowed: usize,
}

impl<R: BufRead> CommentsRemover<R> {
    pub fn new(r: R) -> CommentsRemover<R> {
        CommentsRemover {
            r,
            stripper: CommentStripper::new(),
            line: String::new(),
            pending: String::new(),
            offset: 0,
            lines: 0,
            swallowed: 0,
        }
    }

    pub fn state(&self) -> State {
        self.stripper.state()
    }

    /// Number of input lines consumed so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Number of input lines that produced no output at all.
    pub fn swallowed(&self) -> usize {
        self.swallowed
    }
}

impl<R: BufRead> Read for CommentsRemover<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.offset == self.pending.len() {
            self.pending.clear();
            self.offset = 0;
            self.line.clear();
            if self.r.read_line(&mut self.line)? == 0 {
                return Ok(0);
            }
            self.lines += 1;
            self.stripper.strip_line(&self.line, &mut self.pending);
            if self.pending.is_empty() {
                self.swallowed += 1;
            }
        }
        let data = &self.pending.as_bytes()[self.offset..];
        let size = min(data.len(), buf.len());
        buf[..size].copy_from_slice(&data[..size]);
        self.offset += size;
        Ok(size)
    }
}

pub fn strip_comments<R: BufRead, W: Write>(reader: R, writer: &mut W) -> io::Result<u64> {
    io::copy(&mut CommentsRemover::new(reader), writer)
}
