mod exec;
mod replace;

const USAGE: &'static str = "\
Test, execute and replace regexes from the command line, with the semantics
of the regex-rewrite crate.

USAGE:
    regex-rewrite <command> ...

COMMANDS:
    exec     Print the next match, or every match with --all.
    replace  Replace the first match, or every match with -f g.
    test     Report whether a pattern matches anywhere.
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "exec" => exec::run(p),
        "replace" => replace::run(p),
        "test" => test::run(p),
        unk => anyhow::bail!("unrecognized command '{unk}'"),
    }
}
