//! Shared line-reading loop for the stage parsers.
//!
//! Every stage format is a sequence of section headers with data lines under
//! them. Each stage supplies a closed state enum plus two hooks: a transition
//! table (is this line a header valid in the current state?) and a per-state
//! data-line parser. [`drive`] owns everything else: trimming, comment and
//! blank skipping, line numbering, and fail-fast abort on the first bad line.

use crate::{Error, Result};

/// Outcome of feeding one data line to a grammar. The message becomes the
/// bracketed part of [`Error::Syntax`].
pub(crate) type LineResult = std::result::Result<(), String>;

pub(crate) trait Grammar {
    type State: Copy;

    /// Interprets `line` as a section header. `Some(next)` switches state and
    /// consumes the line; `None` sends the line to [`Grammar::parse_line`].
    fn try_transition(&mut self, state: Self::State, line: &str) -> Option<Self::State>;

    /// Parses one data line in `state`. States that admit no data (the
    /// initial state in every stage) report `wrong state` here.
    fn parse_line(&mut self, state: Self::State, line: &str) -> LineResult;
}

/// Runs `text` through `grammar` from `initial`, failing on the first line
/// that neither transitions nor parses.
pub(crate) fn drive<G: Grammar>(grammar: &mut G, initial: G::State, text: &str) -> Result<()> {
    let mut state = initial;
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(next) = grammar.try_transition(state, line) {
            state = next;
            continue;
        }
        if let Err(message) = grammar.parse_line(state, line) {
            return Err(Error::Syntax {
                line: idx + 1,
                message,
            });
        }
    }
    Ok(())
}

pub(crate) const WRONG_STATE: &str = "wrong state";

pub(crate) fn wrong_state() -> LineResult {
    Err(WRONG_STATE.to_string())
}

/// Splits a record line on single spaces. The wire formats use exactly one
/// space between fields; runs of spaces produce empty fields, which then fail
/// numeric parsing like any other malformed field.
pub(crate) fn fields(line: &str) -> Vec<&str> {
    line.split(' ').collect()
}

/// Parses one numeric field, mapping any failure to the record's own
/// syntax message.
pub(crate) fn num<T: std::str::FromStr>(field: &str, message: &str) -> std::result::Result<T, String> {
    field.parse::<T>().map_err(|_| message.to_string())
}
