use quickcheck::{QuickCheck, TestResult};
use regex_rewrite::{rewrite, NoExpand, Options, Pattern};

// A simple substitution that walks the subject front to back and copies
// into a fresh buffer. Drift corrected splicing must agree with it.
fn naive(subject: &[u8], with: &[u8]) -> Vec<u8> {
    let mut out = vec![];
    let mut i = 0;
    while i < subject.len() {
        if subject[i] == b'a' {
            while i < subject.len() && subject[i] == b'a' {
                i += 1;
            }
            out.extend_from_slice(with);
        } else {
            out.push(subject[i]);
            i += 1;
        }
    }
    out
}

fn squash(bytes: Vec<u8>) -> Vec<u8> {
    // Keep the alphabet small so that runs of `a` are common.
    bytes.into_iter().map(|b| b"ab-"[usize::from(b % 3)]).collect()
}

#[test]
fn splicing_matches_naive_substitution() {
    fn prop(subject: Vec<u8>, with: Vec<u8>) -> TestResult {
        let subject = squash(subject);
        let with = squash(with);
        let re = Pattern::new(b"a+", &Options::default()).unwrap();
        let got = match rewrite(&re, &subject, NoExpand(&with), true) {
            Ok(got) => got,
            Err(err) => return TestResult::error(err.to_string()),
        };
        TestResult::from_bool(got == naive(&subject, &with))
    }
    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(Vec<u8>, Vec<u8>) -> TestResult);
}
