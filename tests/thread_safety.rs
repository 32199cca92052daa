use std::sync::{Arc, Mutex};
use std::thread;

use regex_rewrite::{rewrite, Options, Pattern, Regexp, Template};

#[test]
fn pattern_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Pattern>();
    assert_send_sync::<Template>();
    assert_send_sync::<Regexp>();
}

#[test]
fn shared_pattern_and_template() {
    let re = Arc::new(Pattern::new(br"(\d)", &Options::default()).unwrap());
    let t = Arc::new(Template::new(b"<$1>", 1).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let (re, t) = (Arc::clone(&re), Arc::clone(&t));
            thread::spawn(move || {
                let subject = format!("{} {}", i, i + 1);
                rewrite(&*re, subject.as_bytes(), &*t, true).unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let expected = format!("<{}> <{}>", i, i + 1);
        assert_eq!(handle.join().unwrap(), expected.as_bytes());
    }
}

#[test]
fn stateful_exec_behind_mutex() {
    let re = Arc::new(Mutex::new(Regexp::with_flags(b"a", "g").unwrap()));
    let subject: &'static [u8] = b"aaaaaaaa";
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let re = Arc::clone(&re);
            thread::spawn(move || {
                let mut starts = vec![];
                for _ in 0..2 {
                    let mut re = re.lock().unwrap();
                    let caps = re.exec(subject).unwrap().unwrap();
                    starts.push(caps.record().whole().start());
                }
                starts
            })
        })
        .collect();
    let mut starts: Vec<usize> =
        handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
    starts.sort();
    // Every call advanced last_index, so every match was seen exactly once.
    assert_eq!(starts, (0..8).collect::<Vec<_>>());
}
