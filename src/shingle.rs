//! Whitespace tokenization and shingle (word n-gram) generation.
//!
//! Grounded on the original `text.Shingler`: prime a queue with the first
//! `n` tokens, then slide it one token at a time, joining the queue with
//! single spaces on every step. Tokens stream one at a time off the reader
//! rather than being collected into a vector up front, so the sequence is
//! lazy and consumed strictly forward.

use std::collections::VecDeque;
use std::io::Read;

use tracing::warn;

/// Splits a byte stream into whitespace-delimited word tokens.
///
/// Tokens are runs of non-ASCII-whitespace bytes; leading and trailing
/// whitespace is discarded. An I/O error ends the token sequence: the
/// error is logged and swallowed, never propagated, per the engine's
/// policy that reader failures truncate a document rather than fail it.
struct WordScanner<R> {
    reader: R,
    done: bool,
    bytes_read: usize,
}

impl<R: Read> WordScanner<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
            bytes_read: 0,
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.reader.read(&mut buf) {
            Ok(0) => None,
            Ok(_) => {
                self.bytes_read += 1;
                Some(buf[0])
            }
            Err(err) => {
                warn!(
                    bytes_read = self.bytes_read,
                    error = %err,
                    "shingler input read failed; truncating document"
                );
                self.done = true;
                None
            }
        }
    }
}

impl<R: Read> Iterator for WordScanner<R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut token = Vec::new();

        // Skip leading whitespace.
        loop {
            match self.read_byte() {
                None => return None,
                Some(b) if b.is_ascii_whitespace() => continue,
                Some(b) => {
                    token.push(b);
                    break;
                }
            }
        }

        // Consume the token body.
        while let Some(b) = self.read_byte() {
            if b.is_ascii_whitespace() {
                break;
            }
            token.push(b);
        }

        Some(String::from_utf8_lossy(&token).into_owned())
    }
}

/// A lazy, forward-only, non-restartable sequence of `n`-word shingles over
/// a byte reader.
///
/// Yields `max(0, k - n + 1)` shingles for `k` tokens read, each the `n`
/// tokens in the current window joined with single spaces. Consumes the
/// reader exactly once; a fresh [`Shingler`] is required to shingle the same
/// input again.
pub struct Shingler<R> {
    tokens: WordScanner<R>,
    n: usize,
    window: VecDeque<String>,
    primed: bool,
    exhausted: bool,
}

impl<R: Read> Shingler<R> {
    /// Create a shingler over `reader`, producing `n`-word shingles.
    ///
    /// `n` must be at least 1; callers validate this ahead of time via
    /// [`crate::core::config::IndexConfig::validate`].
    pub fn new(reader: R, n: usize) -> Self {
        debug_assert!(n >= 1, "shingle length must be at least 1");
        Self {
            tokens: WordScanner::new(reader),
            n,
            window: VecDeque::with_capacity(n),
            primed: false,
            exhausted: false,
        }
    }

    fn joined(&self) -> String {
        self.window
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<R: Read> Iterator for Shingler<R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        if !self.primed {
            for _ in 0..self.n {
                match self.tokens.next() {
                    Some(tok) => self.window.push_back(tok),
                    None => {
                        self.exhausted = true;
                        return None;
                    }
                }
            }
            self.primed = true;
            return Some(self.joined());
        }

        match self.tokens.next() {
            Some(tok) => {
                self.window.pop_front();
                self.window.push_back(tok);
                Some(self.joined())
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shingles(text: &str, n: usize) -> Vec<String> {
        Shingler::new(text.as_bytes(), n).collect()
    }

    #[test]
    fn shingles_of_length_two() {
        let out = shingles("this is a test of the shingler", 2);
        assert_eq!(
            out,
            vec![
                "this is",
                "is a",
                "a test",
                "test of",
                "of the",
                "the shingler",
            ]
        );
    }

    #[test]
    fn shingle_length_equals_token_count() {
        let out = shingles("this is a test of the shingler", 7);
        assert_eq!(out, vec!["this is a test of the shingler"]);
    }

    #[test]
    fn fewer_tokens_than_n_yields_nothing() {
        let out = shingles("too few", 5);
        assert!(out.is_empty());
    }

    #[test]
    fn exact_count_matches_k_minus_n_plus_one() {
        let text = "a b c d e f g h";
        let k = text.split_whitespace().count();
        for n in 1..=k {
            let out = shingles(text, n);
            assert_eq!(out.len(), k - n + 1);
            for s in &out {
                assert_eq!(s.split(' ').count(), n);
            }
        }
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        let out = shingles("  foo   bar\tbaz\n\nqux  ", 2);
        assert_eq!(out, vec!["foo bar", "bar baz", "baz qux"]);
    }

    #[test]
    fn empty_input_yields_no_shingles() {
        assert!(shingles("", 1).is_empty());
        assert!(shingles("   \n\t  ", 3).is_empty());
    }
}
