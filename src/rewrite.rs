// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::buffer::SpliceBuffer;
use crate::engine::Searcher;
use crate::error::Error;
use crate::record::{MatchRecord, Span};
use crate::scan::{scan, Signal};
use crate::template::Template;

/// Replacer describes types that can be used to replace matches in a byte
/// string.
///
/// In general, users of this crate shouldn't need to implement this trait,
/// since implementations are already provided for `&Template`, `NoExpand`
/// and `FnMut(&MatchRecord, &[u8]) -> Result<Vec<u8>, Error>`, which covers
/// most use cases.
pub trait Replacer {
    /// Appends text to `dst` to replace the current match.
    ///
    /// The current match is represented by `record`, and `subject` is the
    /// byte string it was found in.
    fn replace_append(
        &mut self,
        record: &MatchRecord,
        subject: &[u8],
        dst: &mut Vec<u8>,
    ) -> Result<(), Error>;
}

impl<'a> Replacer for &'a Template {
    fn replace_append(
        &mut self,
        record: &MatchRecord,
        subject: &[u8],
        dst: &mut Vec<u8>,
    ) -> Result<(), Error> {
        self.render(record, subject, dst)
    }
}

impl<F> Replacer for F
where
    F: FnMut(&MatchRecord, &[u8]) -> Result<Vec<u8>, Error>,
{
    fn replace_append(
        &mut self,
        record: &MatchRecord,
        subject: &[u8],
        dst: &mut Vec<u8>,
    ) -> Result<(), Error> {
        let rep = (*self)(record, subject)?;
        dst.try_reserve(rep.len())?;
        dst.extend_from_slice(&rep);
        Ok(())
    }
}

/// NoExpand indicates literal byte string replacement.
///
/// It can be used with `rewrite` to do a literal byte string replacement
/// without expanding `$N` to the corresponding capture groups.
///
/// `'t` is the lifetime of the literal text.
#[derive(Clone, Copy, Debug)]
pub struct NoExpand<'t>(pub &'t [u8]);

impl<'t> Replacer for NoExpand<'t> {
    fn replace_append(
        &mut self,
        _: &MatchRecord,
        _: &[u8],
        dst: &mut Vec<u8>,
    ) -> Result<(), Error> {
        dst.try_reserve(self.0.len())?;
        dst.extend_from_slice(self.0);
        Ok(())
    }
}

/// The state of a single rewrite: the output buffer and the drift.
///
/// The buffer starts out as a copy of the subject. Every splice may change
/// its length, so the drift records the total change in length caused by
/// all previous splices. A span of the original subject is found in the
/// buffer by shifting it by the drift.
///
/// Spans must be spliced in increasing, non-overlapping order.
#[derive(Debug)]
pub struct RewriteCursor {
    buf: SpliceBuffer,
    diff: isize,
}

impl RewriteCursor {
    /// Starts a rewrite of `subject`.
    pub fn new(subject: &[u8]) -> Result<RewriteCursor, Error> {
        Ok(RewriteCursor { buf: SpliceBuffer::seeded(subject)?, diff: 0 })
    }

    /// Replaces the bytes at `span`, given as offsets into the original
    /// subject, with `with`.
    pub fn splice(&mut self, span: Span, with: &[u8]) -> Result<(), Error> {
        let start = self.shift(span.start())?;
        let end = self.shift(span.end())?;
        self.buf.splice(start, end, with)?;
        self.diff += with.len() as isize - span.len() as isize;
        Ok(())
    }

    /// The total change in length caused by every splice so far.
    pub fn drift(&self) -> isize {
        self.diff
    }

    /// The rewritten bytes so far.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Finishes the rewrite and returns the output.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf.into_vec()
    }

    fn shift(&self, offset: usize) -> Result<usize, Error> {
        offset.checked_add_signed(self.diff).ok_or_else(|| {
            Error::malformed(format!(
                "offset {} shifted by {} is out of range",
                offset, self.diff,
            ))
        })
    }
}

/// Rewrites `subject` by replacing matches of `searcher` with the output of
/// `rep`.
///
/// Only the first match is replaced, unless `global` is true, in which case
/// every non-overlapping match is replaced. If there is no match, a copy of
/// the subject is returned. An empty subject is returned right away without
/// searching it.
///
/// If anything fails, the error is returned and the partially rewritten
/// output is dropped.
pub fn rewrite<S, R>(
    searcher: &S,
    subject: &[u8],
    mut rep: R,
    global: bool,
) -> Result<Vec<u8>, Error>
where
    S: Searcher,
    R: Replacer,
{
    if subject.is_empty() {
        return Ok(vec![]);
    }
    let mut cursor = RewriteCursor::new(subject)?;
    let mut scratch = vec![];
    let outcome = scan(searcher, subject, |subject, record| {
        scratch.clear();
        if let Err(err) = rep.replace_append(record, subject, &mut scratch) {
            return Signal::Fail(err);
        }
        if let Err(err) = cursor.splice(record.whole(), &scratch) {
            return Signal::Fail(err);
        }
        if global {
            Signal::Continue
        } else {
            Signal::Stop
        }
    })?;
    log!(log::debug!(
        "rewrote {} match(es), drift {}",
        outcome.matches(),
        cursor.drift(),
    ));
    Ok(cursor.into_vec())
}
