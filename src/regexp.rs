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
use std::ops::Index;

use crate::engine::{Pattern, Searcher};
use crate::error::{ArgumentError, Error};
use crate::flags::{Flags, Options, Syntax};
use crate::record::MatchRecord;
use crate::rewrite::{rewrite, Replacer};
use crate::scan::find_at;
use crate::template::Template;

/// The maximum number of capture groups a `Regexp` may have.
pub const MAX_GROUPS: usize = 255;

/// A compiled pattern together with the state needed by scripting style
/// APIs: an optional precompiled replacement template, the global flag and
/// the offset at which the next global `exec` starts.
///
/// `exec` mutates the regexp, so sharing one between threads requires a
/// `Mutex`. Everything else only needs a shared reference.
pub struct Regexp {
    pattern: Pattern,
    template: Option<Template>,
    global: bool,
    last_index: usize,
}

impl Regexp {
    /// Compiles a pattern with default options.
    pub fn new(pattern: &[u8]) -> Result<Regexp, Error> {
        RegexpBuilder::new(pattern).build()
    }

    /// Compiles a pattern with the given flag string, such as `"gi"`.
    ///
    /// See `Flags` for the recognized flags.
    pub fn with_flags(pattern: &[u8], flags: &str) -> Result<Regexp, Error> {
        RegexpBuilder::new(pattern).flags(flags)?.build()
    }

    /// Returns true if and only if there is a match anywhere in `subject`.
    ///
    /// This always searches the whole subject and never touches
    /// `last_index`.
    pub fn test(&self, subject: &[u8]) -> Result<bool, Error> {
        self.pattern.is_match_at(subject, 0)
    }

    /// Returns the next match in `subject`.
    ///
    /// If this regexp is global, the search starts at `last_index`, which is
    /// then moved to the end of the match. Calling `exec` repeatedly on the
    /// same subject therefore walks through every match. A `last_index` past
    /// the end of the subject is treated as `0` for this call.
    ///
    /// When no match is found, `last_index` is reset to `0`.
    ///
    /// Note that an empty match leaves `last_index` where it was, so a caller
    /// looping over a global regexp must handle repeated empty matches at the
    /// same offset, e.g., by bounding the number of iterations.
    pub fn exec<'t>(
        &mut self,
        subject: &'t [u8],
    ) -> Result<Option<Captures<'t>>, Error> {
        let start = if self.global && self.last_index <= subject.len() {
            self.last_index
        } else {
            0
        };
        match find_at(&self.pattern, subject, start)? {
            None => {
                self.last_index = 0;
                Ok(None)
            }
            Some(record) => {
                if self.global {
                    self.last_index = record.whole().end();
                }
                Ok(Some(Captures { subject, record }))
            }
        }
    }

    /// Replaces the first match in `subject` (or every match, if this regexp
    /// is global) with `template`.
    ///
    /// If `template` is `None`, the template given to the builder is used.
    /// It is an error if there is neither.
    ///
    /// An empty subject always produces an empty result and a subject without
    /// any match is returned unchanged.
    pub fn replace(
        &self,
        subject: &[u8],
        template: Option<&[u8]>,
    ) -> Result<Vec<u8>, Error> {
        match (template, self.template.as_ref()) {
            (Some(template), _) => {
                let template = Template::new(template, self.captures_len())?;
                self.replace_with(subject, &template)
            }
            (None, Some(template)) => self.replace_with(subject, template),
            (None, None) => Err(ArgumentError::MissingTemplate.into()),
        }
    }

    /// Replaces the first match in `subject` (or every match, if this regexp
    /// is global) with the output of `rep`.
    pub fn replace_with<R: Replacer>(
        &self,
        subject: &[u8],
        rep: R,
    ) -> Result<Vec<u8>, Error> {
        rewrite(&self.pattern, subject, rep, self.global)
    }

    /// The offset at which the next global `exec` starts.
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    pub fn set_last_index(&mut self, i: usize) {
        self.last_index = i;
    }

    /// Resets `last_index` to `0`.
    pub fn reset(&mut self) {
        self.last_index = 0;
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    /// Returns the number of capture groups, not counting the whole match.
    pub fn captures_len(&self) -> usize {
        self.pattern.captures_len()
    }

    /// Returns the template given to the builder, if any.
    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// Returns the underlying compiled pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Returns the pattern exactly as it was given.
    pub fn as_bytes(&self) -> &[u8] {
        self.pattern.as_bytes()
    }
}

impl fmt::Debug for Regexp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Regexp")
            .field("pattern", &String::from_utf8_lossy(self.as_bytes()))
            .field("global", &self.global)
            .field("last_index", &self.last_index)
            .field("template", &self.template.is_some())
            .finish()
    }
}

/// A configurable builder for a `Regexp`.
///
/// Nothing is compiled until `build` is called, so errors in the pattern or
/// template are only reported then.
#[derive(Clone, Debug)]
pub struct RegexpBuilder {
    pattern: Vec<u8>,
    template: Option<Vec<u8>>,
    options: Options,
}

impl RegexpBuilder {
    /// Create a new builder for the given pattern.
    pub fn new(pattern: &[u8]) -> RegexpBuilder {
        RegexpBuilder {
            pattern: pattern.to_vec(),
            template: None,
            options: Options::default(),
        }
    }

    /// Consume the builder and compile the pattern and the template.
    ///
    /// This fails if the pattern doesn't compile, if it has more than
    /// `MAX_GROUPS` capture groups, or if the template refers to a group the
    /// pattern doesn't have.
    pub fn build(&self) -> Result<Regexp, Error> {
        let pattern = Pattern::new(&self.pattern, &self.options)?;
        if pattern.captures_len() > MAX_GROUPS {
            return Err(ArgumentError::TooManyGroups {
                count: pattern.captures_len(),
                max: MAX_GROUPS,
            }
            .into());
        }
        let template = match self.template {
            None => None,
            Some(ref t) => Some(Template::new(t, pattern.captures_len())?),
        };
        Ok(Regexp {
            pattern,
            template,
            global: self.options.flags.global,
            last_index: 0,
        })
    }

    /// Sets every flag from a flag string such as `"gim"`, replacing any
    /// flags set earlier.
    pub fn flags(&mut self, flags: &str) -> Result<&mut RegexpBuilder, Error> {
        self.options.flags = flags.parse::<Flags>()?;
        Ok(self)
    }

    /// Set the value for the case insensitive (`i`) flag.
    pub fn case_insensitive(&mut self, yes: bool) -> &mut RegexpBuilder {
        self.options.flags.case_insensitive = yes;
        self
    }

    /// Set the value for the multi-line matching (`m`) flag.
    ///
    /// When enabled, `^` matches the beginning of lines and `$` matches the
    /// end of lines.
    pub fn multi_line(&mut self, yes: bool) -> &mut RegexpBuilder {
        self.options.flags.multi_line = yes;
        self
    }

    /// Set the value for the global (`g`) flag.
    pub fn global(&mut self, yes: bool) -> &mut RegexpBuilder {
        self.options.flags.global = yes;
        self
    }

    /// Set the dialect the pattern is written in. The default is
    /// `Syntax::Perl`.
    pub fn syntax(&mut self, syntax: Syntax) -> &mut RegexpBuilder {
        self.options.syntax = syntax;
        self
    }

    /// Set the approximate size limit of the compiled pattern.
    pub fn size_limit(&mut self, limit: usize) -> &mut RegexpBuilder {
        self.options.size_limit = limit;
        self
    }

    /// Set a template to precompile. It is used by `Regexp::replace` when
    /// no template is given to it.
    ///
    /// An empty template is the same as no template at all, so `replace`
    /// then needs a template on every call. To delete every match, pass an
    /// empty template to `replace` instead.
    pub fn template(&mut self, template: &[u8]) -> &mut RegexpBuilder {
        self.template = if template.is_empty() {
            None
        } else {
            Some(template.to_vec())
        };
        self
    }
}

/// Captures represents the capture groups of a single match found by
/// `Regexp::exec`.
///
/// Group `0` is always the whole match and each subsequent index is the
/// next capture group in the pattern.
///
/// `'t` is the lifetime of the matched subject.
#[derive(Clone, Eq, PartialEq)]
pub struct Captures<'t> {
    subject: &'t [u8],
    record: MatchRecord,
}

impl<'t> Captures<'t> {
    /// Returns the matched bytes for group `i`. Returns `None` if `i` isn't
    /// a valid group or if the group did not match anything.
    pub fn get(&self, i: usize) -> Option<&'t [u8]> {
        self.record.get(i).map(|span| &self.subject[span.range()])
    }

    /// Creates an iterator of all the capture groups in order of appearance
    /// in the pattern, starting with the whole match.
    pub fn iter<'c>(&'c self) -> SubCaptures<'c, 't> {
        SubCaptures { idx: 0, caps: self }
    }

    /// Returns the offsets of the match and of each group.
    pub fn record(&self) -> &MatchRecord {
        &self.record
    }

    /// Returns the number of groups, including the whole match.
    #[inline]
    pub fn len(&self) -> usize {
        self.record.groups_len() + 1
    }

    /// Always false, since the whole match is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<'t> fmt::Debug for Captures<'t> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn escape_bytes(bytes: &[u8]) -> String {
            let escaped: Vec<u8> = bytes
                .iter()
                .flat_map(|&b| std::ascii::escape_default(b))
                .collect();
            String::from_utf8_lossy(&escaped).into_owned()
        }

        let mut map = f.debug_map();
        for (i, m) in self.iter().enumerate() {
            map.entry(&i, &m.map(escape_bytes));
        }
        map.finish()
    }
}

/// Get a group by index.
///
/// # Panics
///
/// If there is no group at the given index, or if it didn't take part in
/// the match.
impl<'t> Index<usize> for Captures<'t> {
    type Output = [u8];

    fn index(&self, i: usize) -> &[u8] {
        self.get(i).unwrap_or_else(|| panic!("no group at index '{}'", i))
    }
}

/// An iterator over capture groups for a particular match.
///
/// `'c` is the lifetime of the captures and `'t` is the lifetime of the
/// matched text.
#[derive(Debug)]
pub struct SubCaptures<'c, 't> {
    idx: usize,
    caps: &'c Captures<'t>,
}

impl<'c, 't> Iterator for SubCaptures<'c, 't> {
    type Item = Option<&'t [u8]>;

    fn next(&mut self) -> Option<Option<&'t [u8]>> {
        if self.idx < self.caps.len() {
            self.idx += 1;
            Some(self.caps.get(self.idx - 1))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.caps.len() - self.idx;
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::{Regexp, RegexpBuilder, MAX_GROUPS};
    use crate::error::{ArgumentError, Error};

    #[test]
    fn exec_projects_groups() {
        let mut re = Regexp::new(br"(\d+)-(x)?(\d*)").unwrap();
        let caps = re.exec(b"ab 12- cd").unwrap().unwrap();
        assert_eq!(caps.len(), 4);
        assert_eq!(caps.get(0), Some(&b"12-"[..]));
        assert_eq!(&caps[1], b"12");
        assert_eq!(caps.get(2), None);
        assert_eq!(caps.get(3), Some(&b""[..]));
        assert_eq!(caps.get(4), None);
        assert_eq!(caps.iter().size_hint(), (4, Some(4)));
        assert_eq!(
            format!("{:?}", caps),
            r#"{0: Some("12-"), 1: Some("12"), 2: None, 3: Some("")}"#,
        );
    }

    #[test]
    #[should_panic]
    fn index_unset_group_panics() {
        let mut re = Regexp::new(b"(a)|b").unwrap();
        let caps = re.exec(b"b").unwrap().unwrap();
        let _ = &caps[1];
    }

    #[test]
    fn non_global_exec_always_starts_over() {
        let mut re = Regexp::new(b"a").unwrap();
        re.set_last_index(2);
        let caps = re.exec(b"aXa").unwrap().unwrap();
        assert_eq!(caps.record().whole().start(), 0);
        assert_eq!(re.last_index(), 2);
        assert!(re.exec(b"b").unwrap().is_none());
        assert_eq!(re.last_index(), 0);
    }

    #[test]
    fn global_exec_clamps_last_index() {
        let mut re = Regexp::with_flags(b"a", "g").unwrap();
        re.set_last_index(10);
        let caps = re.exec(b"xa").unwrap().unwrap();
        assert_eq!(caps.record().whole().start(), 1);
        assert_eq!(re.last_index(), 2);
        re.reset();
        assert_eq!(re.last_index(), 0);
    }

    #[test]
    fn test_ignores_last_index() {
        let mut re = Regexp::with_flags(b"a", "g").unwrap();
        assert!(re.exec(b"ab").unwrap().is_some());
        assert_eq!(re.last_index(), 1);
        assert!(re.test(b"ab").unwrap());
        assert!(!re.test(b"").unwrap());
        assert_eq!(re.last_index(), 1);
    }

    #[test]
    fn replace_needs_a_template() {
        let re = Regexp::new(b"a").unwrap();
        assert_eq!(
            re.replace(b"abc", None),
            Err(Error::InvalidArgument(ArgumentError::MissingTemplate)),
        );
        let re = RegexpBuilder::new(b"(a)").template(b"[$1]").build().unwrap();
        assert_eq!(re.replace(b"aba", None).unwrap(), b"[a]ba");
        assert_eq!(re.replace(b"aba", Some(&b"<$1>"[..])).unwrap(), b"<a>ba");
        assert!(re.template().is_some());
    }

    #[test]
    fn empty_precompiled_template_is_no_template() {
        let re = RegexpBuilder::new(b"a").template(b"").build().unwrap();
        assert!(re.template().is_none());
        assert_eq!(
            re.replace(b"abc", None),
            Err(Error::InvalidArgument(ArgumentError::MissingTemplate)),
        );
        assert_eq!(re.replace(b"abc", Some(&b""[..])).unwrap(), b"bc");
    }

    #[test]
    fn too_many_groups() {
        let pattern = "(a)".repeat(MAX_GROUPS + 1);
        assert_eq!(
            Regexp::new(pattern.as_bytes()).unwrap_err(),
            Error::InvalidArgument(ArgumentError::TooManyGroups {
                count: MAX_GROUPS + 1,
                max: MAX_GROUPS,
            }),
        );
        let pattern = "(a)".repeat(MAX_GROUPS);
        assert_eq!(
            Regexp::new(pattern.as_bytes()).unwrap().captures_len(),
            MAX_GROUPS,
        );
    }

    #[test]
    fn builder_flags() {
        let mut builder = RegexpBuilder::new(b"^b");
        builder.flags("gim").unwrap();
        let re = builder.build().unwrap();
        assert!(re.is_global());
        assert!(re.test(b"a\nB").unwrap());
        assert!(RegexpBuilder::new(b"a").flags("q").is_err());

        let re = RegexpBuilder::new(b"^b").multi_line(true).build().unwrap();
        assert!(re.test(b"a\nb").unwrap());
        assert!(!re.is_global());
    }

    #[test]
    fn bad_template_fails_construction() {
        let res = RegexpBuilder::new(b"(a)").template(b"$2").build();
        assert_eq!(
            res.unwrap_err(),
            Error::InvalidArgument(ArgumentError::InvalidGroupReference {
                index: 2,
                groups: 1,
            }),
        );
    }
}
