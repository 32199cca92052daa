// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::str::FromStr;

use crate::error::{ArgumentError, Error};

/// The pattern dialect used to interpret a pattern.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Syntax {
    /// The engine's native Perl-like syntax.
    #[default]
    Perl,
    /// Perl syntax where whitespace is insignificant and `#` starts a
    /// comment that runs to the end of the line.
    Extended,
    /// The pattern is matched verbatim. No byte has special meaning.
    Literal,
}

impl FromStr for Syntax {
    type Err = Error;

    fn from_str(s: &str) -> Result<Syntax, Error> {
        match s {
            "perl" => Ok(Syntax::Perl),
            "extended" => Ok(Syntax::Extended),
            "literal" => Ok(Syntax::Literal),
            unk => Err(ArgumentError::InvalidSyntax(unk.to_string()).into()),
        }
    }
}

/// The matching flags that can be given to a pattern as a flag string.
///
/// The recognized flags are:
///
/// * `i` - case insensitive matching.
/// * `m` - multi-line mode: `^` and `$` match at line boundaries.
/// * `g` - global mode: `exec` continues where the previous call stopped and
///   `replace` substitutes every match instead of only the first one.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Flags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub global: bool,
}

impl FromStr for Flags {
    type Err = Error;

    /// Parses a flag string such as `"gi"`. Repeated flags are permitted and
    /// the empty string turns every flag off.
    fn from_str(s: &str) -> Result<Flags, Error> {
        let mut flags = Flags::default();
        for c in s.chars() {
            match c {
                'g' => flags.global = true,
                'i' => flags.case_insensitive = true,
                'm' => flags.multi_line = true,
                unk => return Err(ArgumentError::InvalidFlag(unk).into()),
            }
        }
        Ok(flags)
    }
}

/// Everything that determines how a pattern is compiled.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    pub flags: Flags,
    pub syntax: Syntax,
    /// The approximate size limit, in bytes, of the compiled pattern.
    pub size_limit: usize,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            flags: Flags::default(),
            syntax: Syntax::default(),
            size_limit: 10 * (1 << 20),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Flags, Syntax};
    use crate::error::{ArgumentError, Error};

    #[test]
    fn parse_flags() {
        let flags: Flags = "gim".parse().unwrap();
        assert!(flags.global && flags.case_insensitive && flags.multi_line);

        let flags: Flags = "ii".parse().unwrap();
        assert!(flags.case_insensitive);
        assert!(!flags.global);

        assert_eq!("".parse::<Flags>().unwrap(), Flags::default());
    }

    #[test]
    fn parse_flags_unknown() {
        assert_eq!(
            "gx".parse::<Flags>(),
            Err(Error::InvalidArgument(ArgumentError::InvalidFlag('x'))),
        );
    }

    #[test]
    fn parse_syntax() {
        assert_eq!("literal".parse::<Syntax>().unwrap(), Syntax::Literal);
        assert_eq!("perl".parse::<Syntax>().unwrap(), Syntax::Perl);
        assert!("posix".parse::<Syntax>().is_err());
    }
}
