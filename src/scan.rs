// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::engine::{Searcher, Slot};
use crate::error::Error;
use crate::record::MatchRecord;

/// What a scan handler wants to happen after it has seen a match.
#[derive(Debug)]
pub enum Signal {
    /// Search for the next match.
    Continue,
    /// End the scan successfully.
    Stop,
    /// End the scan and report the given error to the caller of `scan`.
    Fail(Error),
}

/// How a successful scan came to an end. Both variants carry the number of
/// matches that were given to the handler.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The engine found no further match.
    Exhausted(usize),
    /// The handler asked to stop.
    Stopped(usize),
}

impl Outcome {
    /// The number of matches that were given to the handler.
    pub fn matches(&self) -> usize {
        match *self {
            Outcome::Exhausted(n) | Outcome::Stopped(n) => n,
        }
    }
}

/// Returns the first match in `subject` that begins at or after `start`.
pub fn find_at<S: Searcher>(
    searcher: &S,
    subject: &[u8],
    start: usize,
) -> Result<Option<MatchRecord>, Error> {
    if start > subject.len() {
        return Ok(None);
    }
    let mut slots = vec![None; searcher.slots_len()];
    search(searcher, subject, start, &mut slots)
}

/// Runs `handler` on every successive non-overlapping match in `subject`.
///
/// Each search resumes at the end of the previous match. After an empty
/// match the search resumes one position further (as decided by
/// `Searcher::next_after_empty`), so a scan always terminates.
///
/// The scan ends when the engine finds no further match, when the handler
/// returns `Signal::Stop` or `Signal::Fail`, or when the engine reports an
/// error. Errors from the engine and from the handler are returned as is.
pub fn scan<S, F>(
    searcher: &S,
    subject: &[u8],
    mut handler: F,
) -> Result<Outcome, Error>
where
    S: Searcher,
    F: FnMut(&[u8], &MatchRecord) -> Signal,
{
    let mut count = 0;
    for record in records(searcher, subject) {
        let record = record?;
        count += 1;
        match handler(subject, &record) {
            Signal::Continue => {}
            Signal::Stop => return Ok(Outcome::Stopped(count)),
            Signal::Fail(err) => return Err(err),
        }
    }
    Ok(Outcome::Exhausted(count))
}

/// Returns an iterator over every successive non-overlapping match in
/// `subject`.
///
/// The iterator follows the same rules as `scan`. It yields at most one
/// error, after which it is exhausted.
pub fn records<'s, 't, S: Searcher>(
    searcher: &'s S,
    subject: &'t [u8],
) -> Records<'s, 't, S> {
    Records {
        searcher,
        subject,
        slots: vec![None; searcher.slots_len()],
        next_start: Some(0),
    }
}

/// An iterator over successive non-overlapping match records.
///
/// `'s` is the lifetime of the searcher and `'t` is the lifetime of the
/// subject.
#[derive(Debug)]
pub struct Records<'s, 't, S: 's> {
    searcher: &'s S,
    subject: &'t [u8],
    slots: Vec<Slot>,
    next_start: Option<usize>,
}

impl<'s, 't, S: Searcher> Records<'s, 't, S> {
    /// Return the subject being searched.
    pub fn subject(&self) -> &'t [u8] {
        self.subject
    }
}

impl<'s, 't, S: Searcher> Iterator for Records<'s, 't, S> {
    type Item = Result<MatchRecord, Error>;

    fn next(&mut self) -> Option<Result<MatchRecord, Error>> {
        let start = match self.next_start.take() {
            Some(start) if start <= self.subject.len() => start,
            _ => return None,
        };
        let record =
            match search(self.searcher, self.subject, start, &mut self.slots) {
                Ok(Some(record)) => record,
                Ok(None) => return None,
                Err(err) => return Some(Err(err)),
            };
        let whole = record.whole();
        self.next_start = Some(if whole.is_empty() {
            // This is an empty match. To ensure we make progress, start
            // the next search just past it.
            self.searcher.next_after_empty(self.subject, whole.end())
        } else {
            whole.end()
        });
        log!(log::trace!(
            "match at {:?}, resuming at {:?}",
            whole.range(),
            self.next_start,
        ));
        Some(Ok(record))
    }
}

fn search<S: Searcher>(
    searcher: &S,
    subject: &[u8],
    start: usize,
    slots: &mut [Slot],
) -> Result<Option<MatchRecord>, Error> {
    for slot in slots.iter_mut() {
        *slot = None;
    }
    if !searcher.search_at(subject, start, slots)? {
        return Ok(None);
    }
    let record = MatchRecord::from_slots(slots, subject.len())?;
    if record.whole().start() < start {
        return Err(Error::malformed(format!(
            "match at {} begins before the search start {}",
            record.whole().start(),
            start,
        )));
    }
    Ok(Some(record))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use super::{find_at, records, scan, Outcome, Signal};
    use crate::engine::{Searcher, Slot};
    use crate::error::{EngineError, EngineErrorKind, Error};
    use crate::record::Span;

    /// A searcher that replays a fixed list of results, and records every
    /// start offset it was asked to search from.
    #[derive(Debug)]
    pub(crate) struct Scripted {
        groups: usize,
        script: RefCell<Vec<Result<Option<Vec<Slot>>, Error>>>,
        pub(crate) starts: RefCell<Vec<usize>>,
    }

    impl Scripted {
        pub(crate) fn new(
            groups: usize,
            mut script: Vec<Result<Option<Vec<Slot>>, Error>>,
        ) -> Scripted {
            script.reverse();
            Scripted {
                groups,
                script: RefCell::new(script),
                starts: RefCell::new(vec![]),
            }
        }
    }

    impl Searcher for Scripted {
        fn captures_len(&self) -> usize {
            self.groups
        }

        fn search_at(
            &self,
            _subject: &[u8],
            start: usize,
            slots: &mut [Slot],
        ) -> Result<bool, Error> {
            self.starts.borrow_mut().push(start);
            match self.script.borrow_mut().pop() {
                None | Some(Ok(None)) => Ok(false),
                Some(Ok(Some(locs))) => {
                    slots.copy_from_slice(&locs);
                    Ok(true)
                }
                Some(Err(err)) => Err(err),
            }
        }
    }

    pub(crate) fn hit(s: usize, e: usize) -> Result<Option<Vec<Slot>>, Error> {
        Ok(Some(vec![Some(s), Some(e)]))
    }

    fn engine_error() -> Error {
        Error::Engine(EngineError::new(EngineErrorKind::Search, "boom"))
    }

    #[test]
    fn scan_resumes_at_previous_end() {
        let re = Scripted::new(0, vec![hit(0, 2), hit(3, 5), Ok(None)]);
        let mut seen = vec![];
        let outcome = scan(&re, b"aa aa", |_, rec| {
            seen.push(rec.whole());
            Signal::Continue
        });
        assert_eq!(outcome, Ok(Outcome::Exhausted(2)));
        assert_eq!(seen, vec![Span::new(0, 2), Span::new(3, 2)]);
        assert_eq!(*re.starts.borrow(), vec![0, 2, 5]);
    }

    #[test]
    fn scan_advances_past_empty_matches() {
        let re = Scripted::new(0, vec![hit(0, 0), hit(1, 1), hit(2, 2)]);
        let outcome = scan(&re, b"ab", |_, _| Signal::Continue);
        assert_eq!(outcome, Ok(Outcome::Exhausted(3)));
        // No search is attempted past the end of the subject.
        assert_eq!(*re.starts.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn scan_stop() {
        let re = Scripted::new(0, vec![hit(0, 1), hit(1, 2)]);
        let outcome = scan(&re, b"aa", |_, _| Signal::Stop);
        assert_eq!(outcome, Ok(Outcome::Stopped(1)));
        assert_eq!(outcome.unwrap().matches(), 1);
        assert_eq!(*re.starts.borrow(), vec![0]);
    }

    #[test]
    fn scan_handler_failure_is_not_an_engine_error() {
        let re = Scripted::new(0, vec![hit(0, 1), hit(1, 2)]);
        let outcome =
            scan(&re, b"aa", |_, _| Signal::Fail(Error::aborted("nope")));
        assert_eq!(outcome, Err(Error::Aborted("nope".to_string())));
    }

    #[test]
    fn scan_engine_error_aborts() {
        let re = Scripted::new(0, vec![hit(0, 1), Err(engine_error())]);
        let mut calls = 0;
        let outcome = scan(&re, b"aa", |_, _| {
            calls += 1;
            Signal::Continue
        });
        assert_eq!(outcome, Err(engine_error()));
        assert_eq!(calls, 1);
    }

    #[test]
    fn scan_malformed_match() {
        let re = Scripted::new(0, vec![hit(1, 2), hit(0, 1)]);
        match scan(&re, b"aaa", |_, _| Signal::Continue) {
            Err(Error::MalformedMatch(_)) => {}
            res => panic!("unexpected result: {:?}", res),
        }
    }

    #[test]
    fn records_iterator_stops_after_error() {
        let re = Scripted::new(0, vec![hit(0, 1), Err(engine_error())]);
        let mut it = records(&re, b"aa");
        assert_eq!(it.subject(), b"aa");
        assert_eq!(it.next().unwrap().unwrap().whole(), Span::new(0, 1));
        assert_eq!(it.next().unwrap(), Err(engine_error()));
        assert!(it.next().is_none());
    }

    #[test]
    fn find_at_past_end() {
        let re = Scripted::new(0, vec![hit(0, 1)]);
        assert_eq!(find_at(&re, b"a", 2), Ok(None));
        assert!(re.starts.borrow().is_empty());
        assert_eq!(find_at(&re, b"a", 0).unwrap().unwrap().whole().len(), 1);
    }
}
