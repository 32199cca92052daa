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

use memchr::memchr;

use crate::error::{ArgumentError, Error};
use crate::record::MatchRecord;

/// The byte that introduces a group reference in a template.
pub const MARKER: u8 = b'$';

#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    /// A range into `Template::literals`.
    Literal(Range<usize>),
    /// The whole match, written `$0`.
    Whole,
    /// A capture group, indexed from `0` for the group written `$1`.
    Group(usize),
}

/// A substitution template, compiled once against a pattern's group count
/// and rendered once per match.
///
/// The syntax is:
///
/// * `$N` or `${N}` inserts the text of capture group `N`, where `1` is the
///   first group and `0` is the whole match. A group that did not take part
///   in the match inserts nothing. The longest run of digits is used, so use
///   braces to follow a reference with a digit, e.g., `${1}0`.
/// * `$$` inserts a literal `$`.
/// * Any other byte, including a `$` that doesn't start a reference, is
///   copied as is.
///
/// Referring to a group the pattern doesn't have is an error at compile
/// time, never at render time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Template {
    literals: Vec<u8>,
    segments: Vec<Segment>,
    groups_len: usize,
}

impl Template {
    /// Compiles `template` for a pattern with `groups_len` capture groups.
    pub fn new(template: &[u8], groups_len: usize) -> Result<Template, Error> {
        let mut t = Template {
            literals: Vec::with_capacity(template.len()),
            segments: vec![],
            groups_len,
        };
        let mut rest = template;
        while !rest.is_empty() {
            match memchr(MARKER, rest) {
                None => break,
                Some(i) => {
                    t.push_literal(&rest[..i]);
                    rest = &rest[i..];
                }
            }
            if rest.get(1) == Some(&MARKER) {
                t.push_literal(&[MARKER]);
                rest = &rest[2..];
                continue;
            }
            let cap_ref = match find_cap_ref(rest) {
                Some(cap_ref) => cap_ref,
                None => {
                    t.push_literal(&[MARKER]);
                    rest = &rest[1..];
                    continue;
                }
            };
            rest = cap_ref.rest;
            t.push_ref(cap_ref.number)?;
        }
        t.push_literal(rest);
        log!(log::debug!(
            "compiled template with {} segment(s) for {} group(s)",
            t.segments.len(),
            groups_len,
        ));
        Ok(t)
    }

    /// Creates a template that always renders to `bytes`, without looking
    /// for group references.
    pub fn literal(bytes: &[u8]) -> Template {
        let mut t =
            Template { literals: vec![], segments: vec![], groups_len: 0 };
        t.push_literal(bytes);
        t
    }

    /// Returns the rendered text if this template contains no group
    /// references, since it is then the same for every match.
    pub fn as_literal(&self) -> Option<&[u8]> {
        if self.segments.iter().all(|s| matches!(*s, Segment::Literal(_))) {
            Some(&self.literals[..])
        } else {
            None
        }
    }

    /// The number of capture groups this template was compiled for.
    pub fn groups_len(&self) -> usize {
        self.groups_len
    }

    /// Returns true if and only if this template always renders to the empty
    /// string.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends the substitution for `record` to `dst`.
    ///
    /// `subject` must be the subject that `record` was found in. A group
    /// that lies outside of `subject` is reported as `Error::MalformedMatch`
    /// and leaves `dst` untouched.
    pub fn render(
        &self,
        record: &MatchRecord,
        subject: &[u8],
        dst: &mut Vec<u8>,
    ) -> Result<(), Error> {
        let mut len = 0;
        for seg in &self.segments {
            len += self.segment_bytes(seg, record, subject)?.len();
        }
        dst.try_reserve(len)?;
        for seg in &self.segments {
            dst.extend_from_slice(self.segment_bytes(seg, record, subject)?);
        }
        Ok(())
    }

    /// Renders the substitution for `record` into a new buffer.
    pub fn render_to_vec(
        &self,
        record: &MatchRecord,
        subject: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let mut dst = vec![];
        self.render(record, subject, &mut dst)?;
        Ok(dst)
    }

    fn segment_bytes<'a>(
        &'a self,
        seg: &Segment,
        record: &MatchRecord,
        subject: &'a [u8],
    ) -> Result<&'a [u8], Error> {
        let span = match *seg {
            Segment::Literal(ref r) => return Ok(&self.literals[r.clone()]),
            Segment::Whole => Some(record.whole()),
            Segment::Group(i) => record.group(i),
        };
        let span = match span {
            None => return Ok(b""),
            Some(span) => span,
        };
        subject.get(span.range()).ok_or_else(|| {
            Error::malformed(format!(
                "group at {:?} is outside of a subject of length {}",
                span.range(),
                subject.len(),
            ))
        })
    }

    fn push_literal(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let start = self.literals.len();
        self.literals.extend_from_slice(bytes);
        let end = self.literals.len();
        match self.segments.last_mut() {
            Some(Segment::Literal(r)) if r.end == start => r.end = end,
            _ => self.segments.push(Segment::Literal(start..end)),
        }
    }

    fn push_ref(&mut self, number: usize) -> Result<(), Error> {
        if number > self.groups_len {
            return Err(ArgumentError::InvalidGroupReference {
                index: number,
                groups: self.groups_len,
            }
            .into());
        }
        self.segments.push(match number {
            0 => Segment::Whole,
            n => Segment::Group(n - 1),
        });
        Ok(())
    }
}

struct CaptureRef<'a> {
    rest: &'a [u8],
    number: usize,
}

/// Parses a reference at the start of `replacement`, which must begin with
/// the marker. Returns `None` if there is no well formed reference.
fn find_cap_ref(mut replacement: &[u8]) -> Option<CaptureRef> {
    if replacement.len() <= 1 || replacement[0] != MARKER {
        return None;
    }
    let mut brace = false;
    replacement = &replacement[1..];
    if replacement[0] == b'{' {
        brace = true;
        replacement = &replacement[1..];
    }
    let mut cap_end = 0;
    let mut number: usize = 0;
    while let Some(&b) = replacement.get(cap_end) {
        if !b.is_ascii_digit() {
            break;
        }
        // Overflow saturates, which is then rejected as an unknown group.
        number =
            number.saturating_mul(10).saturating_add(usize::from(b - b'0'));
        cap_end += 1;
    }
    if cap_end == 0 {
        return None;
    }
    if brace {
        if replacement.get(cap_end) != Some(&b'}') {
            return None;
        }
        cap_end += 1;
    }
    Some(CaptureRef { rest: &replacement[cap_end..], number })
}
