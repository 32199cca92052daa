// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::TryReserveError;
use std::error;
use std::fmt;

/// An error that occurred while compiling, searching or rewriting.
///
/// Note that "no match" is never reported through this type. Searches that
/// find nothing return `Ok(false)`, `Ok(None)` or the unchanged subject.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The matching engine failed to compile a pattern or to run a search.
    Engine(EngineError),
    /// An argument given by the caller was rejected.
    InvalidArgument(ArgumentError),
    /// An output buffer could not be allocated.
    Allocation(TryReserveError),
    /// The engine reported a match whose intervals are inconsistent.
    MalformedMatch(String),
    /// A scan handler aborted the scan with its own failure.
    Aborted(String),
}

impl Error {
    /// Creates the error a scan handler returns to stop a scan with a
    /// failure of its own.
    pub fn aborted<S: Into<String>>(msg: S) -> Error {
        Error::Aborted(msg.into())
    }

    pub(crate) fn malformed<S: Into<String>>(msg: S) -> Error {
        Error::MalformedMatch(msg.into())
    }

    pub(crate) fn from_regex(err: regex::Error) -> Error {
        let kind = match err {
            regex::Error::Syntax(_) => EngineErrorKind::Syntax,
            regex::Error::CompiledTooBig(_) => EngineErrorKind::CompiledTooBig,
            _ => EngineErrorKind::Other,
        };
        Error::Engine(EngineError { kind, message: err.to_string() })
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Engine(ref err) => Some(err),
            Error::InvalidArgument(ref err) => Some(err),
            Error::Allocation(ref err) => Some(err),
            Error::MalformedMatch(_) | Error::Aborted(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Engine(ref err) => err.fmt(f),
            Error::InvalidArgument(ref err) => {
                write!(f, "invalid argument: {}", err)
            }
            Error::Allocation(ref err) => {
                write!(f, "failed to allocate output buffer: {}", err)
            }
            Error::MalformedMatch(ref msg) => {
                write!(f, "engine reported a malformed match: {}", msg)
            }
            Error::Aborted(ref msg) => write!(f, "scan aborted: {}", msg),
        }
    }
}

impl From<ArgumentError> for Error {
    fn from(err: ArgumentError) -> Error {
        Error::InvalidArgument(err)
    }
}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Error {
        Error::Engine(err)
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Error {
        Error::Allocation(err)
    }
}

/// The category of an engine failure.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EngineErrorKind {
    /// The pattern could not be parsed.
    Syntax,
    /// The compiled pattern exceeded the configured size limit.
    CompiledTooBig,
    /// A search could not be completed.
    Search,
    /// Any other failure reported by the engine.
    Other,
}

/// An error reported by the matching engine, with the engine's own message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineError {
    kind: EngineErrorKind,
    message: String,
}

impl EngineError {
    /// Creates a new engine error. This is mostly useful for implementations
    /// of `Searcher`.
    pub fn new<S: Into<String>>(kind: EngineErrorKind, message: S) -> Self {
        EngineError { kind, message: message.into() }
    }

    /// The category of this failure.
    pub fn kind(&self) -> EngineErrorKind {
        self.kind
    }

    /// The message produced by the engine.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl error::Error for EngineError {}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The ways in which an argument can be rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ArgumentError {
    /// A flag string contained an unrecognized flag.
    InvalidFlag(char),
    /// The pattern is not valid UTF-8.
    InvalidPattern,
    /// A syntax dialect name was not recognized.
    InvalidSyntax(String),
    /// A template refers to a group the pattern doesn't have.
    ///
    /// `index` uses the 1-based numbering of the template and `groups` is
    /// the number of capture groups in the pattern.
    InvalidGroupReference { index: usize, groups: usize },
    /// The pattern has more capture groups than supported.
    TooManyGroups { count: usize, max: usize },
    /// A replacement was requested without a template, and no template was
    /// precompiled.
    MissingTemplate,
    /// A splice range fell outside of the buffer being rewritten.
    SpliceOutOfBounds { start: usize, end: usize, len: usize },
}

impl error::Error for ArgumentError {}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ArgumentError::InvalidFlag(c) => {
                write!(f, "unrecognized flag '{}'", c)
            }
            ArgumentError::InvalidPattern => {
                write!(f, "pattern is not valid UTF-8")
            }
            ArgumentError::InvalidSyntax(ref name) => {
                write!(f, "unrecognized syntax '{}'", name)
            }
            ArgumentError::InvalidGroupReference { index, groups } => write!(
                f,
                "template refers to group {} but the pattern has {} group(s)",
                index, groups,
            ),
            ArgumentError::TooManyGroups { count, max } => {
                write!(f, "too many capture groups: {} > {}", count, max)
            }
            ArgumentError::MissingTemplate => {
                write!(f, "undefined replacement template")
            }
            ArgumentError::SpliceOutOfBounds { start, end, len } => write!(
                f,
                "splice range {}..{} out of bounds for buffer of length {}",
                start, end, len,
            ),
        }
    }
}
