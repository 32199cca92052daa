use std::io::{stdout, Write};

use lexopt::Parser;

use crate::args;

const USAGE: &'static str = "\
Replace matches of a pattern in a subject and print the result.

Only the first match is replaced, unless the 'g' flag is given. The template
is given with -t/--template and is compiled before the subject is read.

USAGE:
    regex-rewrite replace -p <pattern> -t <template> [<path> | -y <subject>]

OPTIONS:
%options%
";

pub fn run(p: &mut Parser) -> anyhow::Result<()> {
    let mut re = args::regexp::Config::default();
    let mut subject = args::subject::Config::default();
    args::configure(p, USAGE, &mut [&mut re, &mut subject])?;

    let template = match re.template() {
        Some(template) => template.to_vec(),
        None => anyhow::bail!("a template is required via -t/--template"),
    };
    let re = re.regexp()?;
    let subject = subject.get()?;
    // An empty template isn't kept by the builder, so always pass it along.
    let out = re.replace(&subject, Some(&template[..]))?;
    log::debug!("rewrote {} bytes into {} bytes", subject.len(), out.len());
    let mut wtr = stdout().lock();
    wtr.write_all(&out)?;
    wtr.flush()?;
    Ok(())
}
