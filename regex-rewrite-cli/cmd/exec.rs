use std::io::{stdout, Write};

use {
    bstr::ByteSlice,
    lexopt::{Arg, Parser},
    regex_rewrite::Captures,
};

use crate::args::{self, Configurable, Usage};

const USAGE: &'static str = "\
Execute a pattern against a subject and print the match.

Each match is printed on one line as its offsets followed by every group,
with unset groups printed as '-'. With --all, exec is called again until it
reports no match, which walks through every match when the 'g' flag is
given.

USAGE:
    regex-rewrite exec -p <pattern> [<path> | -y <subject>]

OPTIONS:
%options%
";

pub fn run(p: &mut Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    let mut re = args::regexp::Config::default();
    let mut subject = args::subject::Config::default();
    args::configure(p, USAGE, &mut [&mut config, &mut re, &mut subject])?;

    let mut re = re.regexp()?;
    let subject = subject.get()?;
    let mut wtr = stdout().lock();
    let mut iterations = 0;
    while let Some(caps) = re.exec(&subject)? {
        write_captures(&mut wtr, &caps)?;
        iterations += 1;
        if !config.all {
            break;
        }
        if config.max_iterations.map_or(false, |max| iterations >= max) {
            log::warn!("stopped after {} iteration(s)", iterations);
            break;
        }
    }
    if iterations == 0 {
        writeln!(wtr, "no match")?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_captures<W: Write>(
    mut wtr: W,
    caps: &Captures<'_>,
) -> anyhow::Result<()> {
    let whole = caps.record().whole();
    write!(wtr, "{}..{}", whole.start(), whole.end())?;
    for group in caps.iter() {
        match group {
            None => write!(wtr, " -")?,
            Some(bytes) => write!(wtr, " {:?}", bytes.as_bstr())?,
        }
    }
    writeln!(wtr)?;
    Ok(())
}

#[derive(Debug)]
struct Config {
    all: bool,
    max_iterations: Option<usize>,
}

impl Default for Config {
    fn default() -> Config {
        Config { all: false, max_iterations: Some(10_000) }
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('a') | Arg::Long("all") => {
                self.all = true;
            }
            Arg::Long("max-iterations") => {
                self.max_iterations =
                    args::parse_maybe(p, "--max-iterations")?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &[Usage] = &[
            Usage::new(
                "-a, --all",
                "Call exec until there is no match.",
                r#"
Call exec repeatedly until it reports no match. Without the 'g' flag, every
call starts over at the beginning of the subject, so this is only useful
together with -f g.
"#,
            ),
            Usage::new(
                "--max-iterations <count>",
                "Stop --all after this many matches (default 10000).",
                r#"
Stop --all after this many matches. An empty match leaves the next start where
it was, so a global pattern that can match the empty string repeats forever
without this limit. Use 'none' to remove the limit.
"#,
            ),
        ];
        USAGES
    }
}
