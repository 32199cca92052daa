use std::{io::Read, path::PathBuf};

use {
    anyhow::Context,
    bstr::{BString, ByteVec},
    lexopt::{Arg, Parser, ValueExt},
};

use crate::args::{Configurable, Usage};

/// Where the subject comes from: inline via `-y/--subject`, a file path
/// given as a positional argument, or stdin when neither is given or the
/// path is `-`.
#[derive(Debug, Default)]
pub struct Config {
    kind: Option<Kind>,
}

#[derive(Debug)]
enum Kind {
    Inline(BString),
    Path(PathBuf),
}

impl Config {
    /// Reads the whole subject.
    pub fn get(&self) -> anyhow::Result<BString> {
        match self.kind {
            Some(Kind::Inline(ref subject)) => Ok(subject.clone()),
            Some(Kind::Path(ref path)) if path.as_os_str() != "-" => {
                let contents = std::fs::read(path).with_context(|| {
                    format!("failed to read {}", path.display())
                })?;
                Ok(BString::from(contents))
            }
            _ => {
                let mut contents = vec![];
                std::io::stdin()
                    .lock()
                    .read_to_end(&mut contents)
                    .context("failed to read stdin")?;
                Ok(BString::from(contents))
            }
        }
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('y') | Arg::Long("subject") => {
                anyhow::ensure!(
                    self.kind.is_none(),
                    "only one subject is allowed",
                );
                let subject =
                    p.value().context("-y/--subject needs a value")?;
                let subject = subject
                    .string()
                    .context("-y/--subject must be valid UTF-8")?;
                let subject = Vec::unescape_bytes(&subject);
                self.kind = Some(Kind::Inline(BString::from(subject)));
            }
            Arg::Value(ref mut v) => {
                anyhow::ensure!(
                    self.kind.is_none(),
                    "only one subject is allowed",
                );
                let path = PathBuf::from(std::mem::take(v));
                self.kind = Some(Kind::Path(path));
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &'static [Usage] = &[Usage::new(
            "-y, --subject <subject>",
            "Provide an inline subject on the command line.",
            r#"
Provide the subject on the command line instead of a file path. The value must
be valid UTF-8, but escape sequences are supported, so "-y 'a\xFF\t'" is the
byte sequence 0x61 0xFF 0x09.

Exactly one subject is permitted. Without this flag, the subject is read from
the file path given as a positional argument, or from stdin if there is no
path or if the path is '-'.
"#,
        )];
        USAGES
    }
}
