use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
    regex_rewrite::{Flags, Regexp, RegexpBuilder, Syntax},
};

use crate::args::{self, Configurable, Usage};

/// The pattern, its flags and an optional precompiled template.
#[derive(Debug, Default)]
pub struct Config {
    pattern: Option<String>,
    flags: Flags,
    syntax: Syntax,
    size_limit: Option<usize>,
    template: Option<String>,
}

impl Config {
    /// Compiles the pattern and the template, if one was given.
    pub fn regexp(&self) -> anyhow::Result<Regexp> {
        let pattern = match self.pattern {
            Some(ref pattern) => pattern,
            None => anyhow::bail!("a pattern is required via -p/--pattern"),
        };
        let mut builder = RegexpBuilder::new(pattern.as_bytes());
        builder
            .syntax(self.syntax)
            .case_insensitive(self.flags.case_insensitive)
            .multi_line(self.flags.multi_line)
            .global(self.flags.global);
        if let Some(limit) = self.size_limit {
            builder.size_limit(limit);
        }
        if let Some(ref template) = self.template {
            builder.template(template.as_bytes());
        }
        let re = builder
            .build()
            .with_context(|| format!("failed to compile {:?}", pattern))?;
        log::debug!("compiled {:?}", re);
        Ok(re)
    }

    /// The template given with -t/--template, if any.
    pub fn template(&self) -> Option<&[u8]> {
        self.template.as_deref().map(str::as_bytes)
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('p') | Arg::Long("pattern") => {
                let pat = p.value().context("-p/--pattern needs a value")?;
                let pat = pat
                    .string()
                    .context("-p/--pattern must be valid UTF-8")?;
                self.pattern = Some(pat);
            }
            Arg::Short('f') | Arg::Long("flags") => {
                self.flags = args::parse(p, "-f/--flags")?;
            }
            Arg::Long("syntax") => {
                self.syntax = args::parse(p, "--syntax")?;
            }
            Arg::Long("size-limit") => {
                self.size_limit = args::parse_maybe(p, "--size-limit")?;
            }
            Arg::Short('t') | Arg::Long("template") => {
                let t = p.value().context("-t/--template needs a value")?;
                let t =
                    t.string().context("-t/--template must be valid UTF-8")?;
                self.template = Some(t);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &'static [Usage] = &[
            Usage::new(
                "-p, --pattern <pattern>",
                "The pattern to compile.",
                r#"
The pattern to compile. It must be valid UTF-8, but it may match arbitrary
bytes, e.g., '(?-u:\xFF)'.
"#,
            ),
            Usage::new(
                "-f, --flags <flags>",
                "Set flags, any of 'g', 'i' and 'm'.",
                r#"
Set flags for the pattern. 'i' enables case insensitive matching, 'm' makes '^'
and '$' match at line boundaries and 'g' makes 'exec' continue where its
previous match ended and 'replace' replace every match instead of only the
first one.
"#,
            ),
            Usage::new(
                "--syntax <name>",
                "One of 'perl' (default), 'extended' or 'literal'.",
                r#"
The dialect the pattern is written in. 'extended' ignores whitespace and
permits '#' comments. 'literal' matches the pattern text exactly.
"#,
            ),
            Usage::new(
                "--size-limit <bytes>",
                "Set the size limit of the compiled pattern.",
                r#"
Set the approximate size limit, in bytes, of the compiled pattern. Use 'none'
to restore the default.
"#,
            ),
            Usage::new(
                "-t, --template <template>",
                "Precompile a replacement template.",
                r#"
A replacement template. '$N' or '${N}' inserts group N, '$0' inserts the whole
match and '$$' inserts a literal '$'. Referring to a group the pattern doesn't
have is reported before any search runs.
"#,
            ),
        ];
        USAGES
    }
}
