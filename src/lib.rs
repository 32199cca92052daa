// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This crate provides match projection, global scanning and template driven
//! substitution over byte strings. The matching itself is delegated to
//! Rust's `regex` crate; everything built on top of a single "find the
//! leftmost-first match starting at offset `i`" operation lives here.
//!
//! The pieces, from the bottom up:
//!
//! * A `Searcher` is the matching engine. `Pattern` is the one provided by
//!   this crate.
//! * A `MatchRecord` is the projection of a single match into the span of
//!   the whole match and of every capture group. Groups that did not take
//!   part in the match are `None`, which is never confused with a group
//!   that matched the empty string.
//! * `scan` feeds every successive non-overlapping match to a handler that
//!   decides, with a `Signal`, whether to continue, stop or fail.
//! * A `Template` is a replacement string such as `"<$1>"`, compiled once
//!   and rendered for every match.
//! * `rewrite` ties these together: it splices the rendered replacement for
//!   each match into a copy of the subject, shifting every splice by the
//!   change in length caused by the splices before it.
//! * `Regexp` bundles all of the above behind the interface scripting
//!   languages are used to: `test`, `exec` with a global `last_index`, and
//!   `replace`.
//!
//! # Usage
//!
//! ```rust
//! use regex_rewrite::Regexp;
//!
//! let re = Regexp::with_flags(br"(\w+)", "g").unwrap();
//! let out = re.replace(b"hi there", Some(&b"<$1>"[..])).unwrap();
//! assert_eq!(out, b"<hi> <there>");
//! ```
//!
//! # Example: walking through matches with `exec`
//!
//! A global regexp remembers where its last match ended, so repeated calls to
//! `exec` visit every match and then report `None`, after which the next call
//! starts over:
//!
//! ```rust
//! use regex_rewrite::Regexp;
//!
//! let mut re = Regexp::with_flags(b"a", "g").unwrap();
//! let subject = b"aXaXa";
//! let mut starts = vec![];
//! while let Some(caps) = re.exec(subject).unwrap() {
//!     starts.push(caps.record().whole().start());
//! }
//! assert_eq!(starts, vec![0, 2, 4]);
//! assert_eq!(re.last_index(), 0);
//! ```
//!
//! # Example: a custom scan
//!
//! ```rust
//! use regex_rewrite::{scan, Options, Pattern, Signal};
//!
//! let re = Pattern::new(br"\d+", &Options::default()).unwrap();
//! let mut sum = 0;
//! scan(&re, b"1 22 333 4444", |subject, rec| {
//!     let bytes = &subject[rec.whole().range()];
//!     let digits = std::str::from_utf8(bytes).unwrap();
//!     sum += digits.parse::<u32>().unwrap();
//!     if sum > 300 { Signal::Stop } else { Signal::Continue }
//! })
//! .unwrap();
//! assert_eq!(sum, 356);
//! ```
//!
//! # Template syntax
//!
//! `$N` and `${N}` insert capture group `N` (`$0` being the whole match) and
//! `$$` inserts a literal `$`. See `Template` for the details. A template that
//! refers to a group the pattern doesn't have is rejected when it is
//! compiled, before any search takes place.
//!
//! # Crate features
//!
//! * **logging** (enabled by default) - Emits records through the `log`
//!   crate: compiled patterns and templates at `debug` level, each match of
//!   a scan at `trace` level and a summary of each rewrite at `debug` level.

#[macro_use]
mod macros;

mod buffer;
mod engine;
mod error;
mod flags;
mod record;
mod regexp;
mod rewrite;
mod scan;
mod template;

pub use crate::buffer::SpliceBuffer;
pub use crate::engine::{Pattern, Searcher, Slot};
pub use crate::error::{ArgumentError, EngineError, EngineErrorKind, Error};
pub use crate::flags::{Flags, Options, Syntax};
pub use crate::record::{MatchRecord, Span};
pub use crate::regexp::{
    Captures, Regexp, RegexpBuilder, SubCaptures, MAX_GROUPS,
};
pub use crate::rewrite::{rewrite, NoExpand, Replacer, RewriteCursor};
pub use crate::scan::{find_at, records, scan, Outcome, Records, Signal};
pub use crate::template::{Template, MARKER};
