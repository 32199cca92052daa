// Convenience macros for writing rewrite tests over UTF-8 test data. The
// crate itself only deals in bytes.

macro_rules! replace {
    ($name:ident, $re:expr, $flags:expr, $subject:expr, $template:expr,
     $expected:expr) => {
        #[test]
        fn $name() {
            let re = regexp!($re, $flags);
            let got = re
                .replace($subject.as_bytes(), Some($template.as_bytes()))
                .unwrap();
            assert_eq!(
                String::from_utf8_lossy(&got),
                $expected,
                "replacing {:?} with {:?} in {:?}",
                $re,
                $template,
                $subject,
            );
        }
    };
}

macro_rules! execall {
    ($name:ident, $re:expr, $subject:expr $(, $loc:expr)*) => {
        #[test]
        fn $name() {
            let mut re = regexp!($re, "g");
            let mut got: Vec<(usize, usize)> = vec![];
            while let Some(caps) = re.exec($subject.as_bytes()).unwrap() {
                let whole = caps.record().whole();
                got.push((whole.start(), whole.end()));
                assert!(got.len() <= 100, "too many matches");
            }
            let expected: Vec<(usize, usize)> = vec![$($loc),*];
            assert_eq!(got, expected);
        }
    };
}
