use regex_rewrite::{
    find_at, records, rewrite, scan, Options, Outcome, Pattern, Searcher,
    Signal, Span, Template,
};

fn pattern(re: &str) -> Pattern {
    Pattern::new(re.as_bytes(), &Options::default()).unwrap()
}

#[test]
fn scan_sums_until_stopped() {
    let re = pattern(r"\d+");
    let mut sum = 0;
    let outcome = scan(&re, b"10 20 30 40", |subject, rec| {
        let digits = std::str::from_utf8(&subject[rec.whole().range()])
            .unwrap()
            .parse::<u32>()
            .unwrap();
        sum += digits;
        if sum >= 60 {
            Signal::Stop
        } else {
            Signal::Continue
        }
    })
    .unwrap();
    assert_eq!(outcome, Outcome::Stopped(3));
    assert_eq!(sum, 60);
}

#[test]
fn records_are_non_overlapping_and_increasing() {
    let re = pattern("a*");
    let spans: Vec<Span> = records(&re, b"baab")
        .map(|rec| rec.unwrap().whole())
        .collect();
    assert_eq!(
        spans,
        vec![
            Span::new(0, 0),
            Span::new(1, 2),
            Span::new(3, 0),
            Span::new(4, 0),
        ],
    );
}

#[test]
fn records_report_groups() {
    let re = pattern(r"(\w)(\d)?");
    let recs: Vec<_> = records(&re, b"a1 b").map(|r| r.unwrap()).collect();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].group(1), Some(Span::new(1, 1)));
    assert_eq!(recs[1].group(1), None);
    assert_eq!(recs[1].get(0), Some(Span::new(3, 1)));
    assert_eq!(recs[1].groups_len(), 2);
}

#[test]
fn find_at_respects_start() {
    let re = pattern(r"\bfoo");
    let rec = find_at(&re, b"foo xfoo foo", 1).unwrap().unwrap();
    assert_eq!(rec.whole(), Span::new(9, 3));
    assert!(find_at(&re, b"foo", 4).unwrap().is_none());
}

#[test]
fn rewrite_with_shared_template() {
    let re = pattern(r"(\w+)@(\w+)");
    let t = Template::new(b"$2 at $1", re.captures_len()).unwrap();
    let first = rewrite(&re, b"me@home", &t, true).unwrap();
    let second = rewrite(&re, b"a@b c@d", &t, true).unwrap();
    assert_eq!(first, b"home at me");
    assert_eq!(second, b"b at a d at c");
}

