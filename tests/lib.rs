// Due to macro scoping rules, these definitions only apply to the modules
// declared below.
macro_rules! regexp {
    ($re:expr) => {
        regex_rewrite::Regexp::new($re.as_bytes()).unwrap()
    };
    ($re:expr, $flags:expr) => {
        regex_rewrite::Regexp::with_flags($re.as_bytes(), $flags).unwrap()
    };
}

// Must come before other module definitions.
include!("macros.rs");

mod property;
mod scan;
mod thread_safety;
