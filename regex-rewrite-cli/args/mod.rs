use std::{
    fmt::{Debug, Display, Write},
    str::FromStr,
};

use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
};

pub mod regexp;
pub mod subject;

/// A group of flags that a sub-command accepts.
///
/// Each command hands every argument to its targets in turn, and the first
/// target that recognizes the argument consumes it.
pub trait Configurable: Debug {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool>;

    fn usage(&self) -> &[Usage];
}

/// Parses every remaining argument with the given targets. `-h` and `--help`
/// turn `usage` into an error with `%options%` replaced by the flags of all
/// targets.
pub fn configure(
    p: &mut Parser,
    usage: &str,
    targets: &mut [&mut dyn Configurable],
) -> anyhow::Result<()> {
    while let Some(arg) = p.next()? {
        match arg {
            Arg::Short('h') | Arg::Long("help") => {
                let mut usages = vec![];
                for t in targets.iter() {
                    usages.extend_from_slice(t.usage());
                }
                usages.sort_by_key(|u| {
                    u.format
                        .split_once(", ")
                        .map(|(_, long)| long)
                        .unwrap_or(u.format)
                });
                let options = if arg == Arg::Short('h') {
                    Usage::short(&usages)
                } else {
                    Usage::long(&usages)
                };
                let usage = usage.replace("%options%", &options);
                anyhow::bail!("{}", usage.trim());
            }
            _ => {}
        }
        // Long flag names borrow from the parser, so give them a home of
        // their own before handing the parser to the targets.
        let long_flag: Option<String> = match arg {
            Arg::Long(name) => Some(name.to_string()),
            _ => None,
        };
        let mut arg = match long_flag {
            Some(ref flag) => Arg::Long(flag),
            None => match arg {
                Arg::Short(c) => Arg::Short(c),
                Arg::Long(_) => unreachable!(),
                Arg::Value(value) => Arg::Value(value),
            },
        };
        let mut recognized = false;
        for t in targets.iter_mut() {
            if t.configure(p, &mut arg)? {
                recognized = true;
                break;
            }
        }
        if !recognized {
            return Err(arg.unexpected().into());
        }
    }
    Ok(())
}

/// Parses the next argument as a command name. `-h` and `--help` turn the
/// given usage into an error.
pub fn next_as_command(usage: &str, p: &mut Parser) -> anyhow::Result<String> {
    let usage = usage.trim();
    let arg = match p.next()? {
        Some(arg) => arg,
        None => anyhow::bail!("{usage}"),
    };
    let cmd = match arg {
        Arg::Value(cmd) => cmd.string()?,
        Arg::Short('h') | Arg::Long("help") => anyhow::bail!("{usage}"),
        arg => return Err(arg.unexpected().into()),
    };
    Ok(cmd)
}

/// Parses the next `p.value()` into `T`. Errors mention the flag name.
pub fn parse<T>(p: &mut Parser, flag_name: &'static str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: Display + Debug + Send + Sync + 'static,
{
    match parse_str(p, flag_name)?.parse() {
        Err(err) => Err(anyhow::Error::msg(err).context(flag_name)),
        Ok(parsed) => Ok(parsed),
    }
}

/// Like `parse`, but the value `none` means absent.
pub fn parse_maybe<T>(
    p: &mut Parser,
    flag_name: &'static str,
) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    <T as FromStr>::Err: Display + Debug + Send + Sync + 'static,
{
    let strv = parse_str(p, flag_name)?;
    if strv == "none" {
        return Ok(None);
    }
    match strv.parse() {
        Err(err) => Err(anyhow::Error::msg(err).context(flag_name)),
        Ok(parsed) => Ok(Some(parsed)),
    }
}

fn parse_str(
    p: &mut Parser,
    flag_name: &'static str,
) -> anyhow::Result<String> {
    let osv = p.value().context(flag_name)?;
    match osv.into_string() {
        Ok(strv) => Ok(strv),
        Err(osv) => {
            let err = lexopt::Error::NonUnicodeValue(osv);
            Err(anyhow::Error::from(err).context(flag_name))
        }
    }
}

/// The documentation of a flag.
#[derive(Clone, Copy, Debug)]
pub struct Usage {
    /// The format of the flag, for example, `-f, --flags <flags>`.
    pub format: &'static str,
    /// A one line description.
    pub short: &'static str,
    /// A longer description, possibly several paragraphs.
    pub long: &'static str,
}

impl Usage {
    pub const fn new(
        format: &'static str,
        short: &'static str,
        long: &'static str,
    ) -> Usage {
        Usage { format, short, long }
    }

    /// Formats a two column table of each format and its short
    /// description.
    pub fn short(usages: &[Usage]) -> String {
        const MIN_SPACE: usize = 2;

        let mut result = String::new();
        let max_len = match usages.iter().map(|u| u.format.len()).max() {
            None => return result,
            Some(len) => len,
        };
        for usage in usages.iter() {
            let padlen = MIN_SPACE + (max_len - usage.format.len());
            let padding = " ".repeat(padlen);
            // Writing to a String never fails.
            let _ = writeln!(
                result,
                "    {}{}{}",
                usage.format, padding, usage.short
            );
        }
        result
    }

    /// Formats each usage with its long description wrapped and indented
    /// below it.
    pub fn long(usages: &[Usage]) -> String {
        let wrap_opts = textwrap::Options::new(79)
            .initial_indent("        ")
            .subsequent_indent("        ");
        let mut result = String::new();
        for (i, usage) in usages.iter().enumerate() {
            if i > 0 {
                result.push('\n');
            }
            let _ = writeln!(result, "    {}", usage.format);
            for (i, paragraph) in usage.long.trim().split("\n\n").enumerate() {
                if i > 0 {
                    result.push('\n');
                }
                let flattened = paragraph.replace('\n', " ");
                for line in textwrap::wrap(&flattened, &wrap_opts) {
                    result.push_str(&line);
                    result.push('\n');
                }
            }
        }
        result
    }
}
