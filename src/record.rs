// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::ops::Range;

use crate::engine::Slot;
use crate::error::Error;

/// A half open interval of bytes in a subject, `[start, start + len)`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Span {
    start: usize,
    len: usize,
}

impl Span {
    /// Creates a span starting at `start` and covering `len` bytes.
    pub fn new(start: usize, len: usize) -> Span {
        Span { start, len }
    }

    /// The offset of the first byte in this span.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// The offset immediately following the last byte in this span.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// The location of a single match and of each of its capture groups.
///
/// Groups are stored in order of their opening parenthesis. A group that
/// did not participate in the match is `None`, which is never confused with
/// a group that matched the empty string: the latter is a span of length
/// zero at the position where it matched.
///
/// Records describe offsets only. The matched bytes are recovered by
/// indexing the subject the record was produced from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchRecord {
    whole: Span,
    groups: Vec<Option<Span>>,
}

impl MatchRecord {
    /// Projects the slots filled in by a successful search into a record.
    ///
    /// `slots` must hold the whole match followed by every group, two slots
    /// each. An error is returned if the slots are inconsistent: if the
    /// whole match is missing, if an interval ends before it starts or past
    /// `subject_len`, or if only one half of a group is set.
    pub fn from_slots(
        slots: &[Slot],
        subject_len: usize,
    ) -> Result<MatchRecord, Error> {
        if slots.len() < 2 || slots.len() % 2 != 0 {
            return Err(Error::malformed(format!(
                "expected an even number of at least 2 slots, got {}",
                slots.len(),
            )));
        }
        let whole = match project(slots[0], slots[1], subject_len)? {
            Some(span) => span,
            None => return Err(Error::malformed("whole match is unset")),
        };
        let mut groups = Vec::with_capacity(slots.len() / 2 - 1);
        for pair in slots[2..].chunks(2) {
            groups.push(project(pair[0], pair[1], subject_len)?);
        }
        Ok(MatchRecord { whole, groups })
    }

    /// The span of the whole match.
    #[inline]
    pub fn whole(&self) -> Span {
        self.whole
    }

    /// The spans of the capture groups, where index `0` is the first group.
    #[inline]
    pub fn groups(&self) -> &[Option<Span>] {
        &self.groups
    }

    /// The span of the capture group at `i`, counting the first group as
    /// `0`. Returns `None` if there is no such group or if it did not
    /// participate in the match.
    pub fn group(&self, i: usize) -> Option<Span> {
        self.groups.get(i).copied().flatten()
    }

    /// The span of the group numbered `n` as in a pattern or template: `0`
    /// is the whole match and `1` is the first capture group.
    pub fn get(&self, n: usize) -> Option<Span> {
        match n {
            0 => Some(self.whole),
            n => self.group(n - 1),
        }
    }

    /// The number of capture groups, not counting the whole match.
    #[inline]
    pub fn groups_len(&self) -> usize {
        self.groups.len()
    }
}

fn project(
    start: Slot,
    end: Slot,
    subject_len: usize,
) -> Result<Option<Span>, Error> {
    match (start, end) {
        (None, None) => Ok(None),
        (Some(s), Some(e)) if s <= e && e <= subject_len => {
            Ok(Some(Span::new(s, e - s)))
        }
        (Some(s), Some(e)) => Err(Error::malformed(format!(
            "interval {}..{} is invalid for a subject of length {}",
            s, e, subject_len,
        ))),
        (s, e) => Err(Error::malformed(format!(
            "group is only partially set ({:?}, {:?})",
            s, e,
        ))),
    }
}
