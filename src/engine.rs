// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::str;

use regex::bytes::{self, RegexBuilder};

use crate::error::{ArgumentError, Error};
use crate::flags::{Options, Syntax};

/// Slot is a single saved capture location. Note that there are two slots for
/// every capture group (one slot each for the start and end of the capture)
/// and that the first two slots always belong to the whole match.
///
/// A group that did not participate in a match has `None` in both of its
/// slots.
pub type Slot = Option<usize>;

/// Searcher describes the matching engine that everything in this crate is
/// built on.
///
/// The engine is only ever asked to find the leftmost-first match starting
/// at some offset. All iteration, projection and rewriting happens on top of
/// this one operation.
pub trait Searcher {
    /// The number of capture groups in the compiled pattern, not counting
    /// the implicit group for the whole match.
    fn captures_len(&self) -> usize;

    /// The number of capture slots needed by `search_at`. This is always two
    /// times the number of groups, including the whole match.
    fn slots_len(&self) -> usize {
        2 * (self.captures_len() + 1)
    }

    /// Searches `subject` for the leftmost-first match beginning at or after
    /// `start`, and fills in `slots` with the locations of the whole match
    /// and every capture group.
    ///
    /// The search takes the bytes before `start` into account, so that
    /// anchors and word boundaries behave as they would for the whole
    /// subject.
    ///
    /// Returns `Ok(false)` when there is no match. This is not an error.
    fn search_at(
        &self,
        subject: &[u8],
        start: usize,
        slots: &mut [Slot],
    ) -> Result<bool, Error>;

    /// Returns whether there is any match beginning at or after `start`.
    fn is_match_at(
        &self,
        subject: &[u8],
        start: usize,
    ) -> Result<bool, Error> {
        let mut slots = vec![None; self.slots_len()];
        self.search_at(subject, start, &mut slots)
    }

    /// Returns the position at which to resume searching after an empty match
    /// ending at `i`.
    ///
    /// Subjects are treated as sequences of bytes, so the default moves ahead
    /// by a single byte.
    fn next_after_empty(&self, _subject: &[u8], i: usize) -> usize {
        i + 1
    }
}

impl<'a, S: Searcher + ?Sized> Searcher for &'a S {
    fn captures_len(&self) -> usize {
        (**self).captures_len()
    }

    fn slots_len(&self) -> usize {
        (**self).slots_len()
    }

    fn search_at(
        &self,
        subject: &[u8],
        start: usize,
        slots: &mut [Slot],
    ) -> Result<bool, Error> {
        (**self).search_at(subject, start, slots)
    }

    fn is_match_at(
        &self,
        subject: &[u8],
        start: usize,
    ) -> Result<bool, Error> {
        (**self).is_match_at(subject, start)
    }

    fn next_after_empty(&self, subject: &[u8], i: usize) -> usize {
        (**self).next_after_empty(subject, i)
    }
}

/// A compiled pattern.
///
/// A pattern owns the engine's compiled program. It is released when the
/// pattern is dropped and is never copied. Patterns are immutable after
/// construction, so a single pattern may be searched from many threads at
/// once.
pub struct Pattern {
    re: bytes::Regex,
    source: Box<[u8]>,
}

impl Pattern {
    /// Compiles `pattern` with the given options.
    ///
    /// The pattern must be valid UTF-8, which is the one text encoding the
    /// engine understands. Subjects, on the other hand, may be arbitrary
    /// bytes.
    pub fn new(pattern: &[u8], options: &Options) -> Result<Pattern, Error> {
        let text = str::from_utf8(pattern)
            .map_err(|_| Error::from(ArgumentError::InvalidPattern))?;
        let escaped;
        let text = match options.syntax {
            Syntax::Literal => {
                escaped = regex::escape(text);
                &*escaped
            }
            Syntax::Perl | Syntax::Extended => text,
        };
        let re = RegexBuilder::new(text)
            .case_insensitive(options.flags.case_insensitive)
            .multi_line(options.flags.multi_line)
            .ignore_whitespace(options.syntax == Syntax::Extended)
            .size_limit(options.size_limit)
            .build()
            .map_err(Error::from_regex)?;
        log!(log::debug!(
            "compiled pattern {:?} with {} capture group(s)",
            text,
            re.captures_len() - 1,
        ));
        Ok(Pattern { re, source: pattern.into() })
    }

    /// Returns the pattern exactly as it was given to `new`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.source
    }
}

impl Searcher for Pattern {
    fn captures_len(&self) -> usize {
        // The engine counts the whole match as a group.
        self.re.captures_len() - 1
    }

    fn search_at(
        &self,
        subject: &[u8],
        start: usize,
        slots: &mut [Slot],
    ) -> Result<bool, Error> {
        if start > subject.len() {
            return Ok(false);
        }
        let mut locs = self.re.capture_locations();
        if self.re.captures_read_at(&mut locs, subject, start).is_none() {
            return Ok(false);
        }
        for (i, pair) in slots.chunks_mut(2).enumerate() {
            let (s, e) = match locs.get(i) {
                None => (None, None),
                Some((s, e)) => (Some(s), Some(e)),
            };
            pair[0] = s;
            if let Some(slot) = pair.get_mut(1) {
                *slot = e;
            }
        }
        Ok(true)
    }

    fn is_match_at(
        &self,
        subject: &[u8],
        start: usize,
    ) -> Result<bool, Error> {
        if start > subject.len() {
            return Ok(false);
        }
        Ok(self.re.is_match_at(subject, start))
    }

    /// Steps over the whole UTF-8 encoded character at `i`, so that a search
    /// never resumes inside a character. Bytes that don't start a valid
    /// encoding are stepped over one at a time.
    fn next_after_empty(&self, subject: &[u8], i: usize) -> usize {
        let len = match subject.get(i) {
            None => return i + 1,
            Some(&b) => utf8_len(b),
        };
        match subject.get(i..i + len).map(str::from_utf8) {
            Some(Ok(_)) => i + len,
            _ => i + 1,
        }
    }
}

/// The length of the UTF-8 encoding that begins with `b`, or `1` if `b` can't
/// begin one.
fn utf8_len(b: u8) -> usize {
    match b {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}

impl fmt::Debug for Pattern {
    /// Shows the original pattern.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Pattern")
            .field(&String::from_utf8_lossy(&self.source))
            .finish()
    }
}
