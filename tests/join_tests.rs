//! Literal join results

use portable_fs::join::{join, join2, SEPARATOR};
use rstest::rstest;

#[test]
fn test_join2_literals() {
    assert_eq!(join2("foo", "bar/baz"), format!("foo{SEPARATOR}bar/baz"));
    assert_eq!(join2("", "a"), "a");
    assert_eq!(join2("a", ""), "a");
    assert_eq!(join2("", ""), "");
}

#[rstest]
#[case(&["foo", "bar/baz", "qux"], "foo/bar/baz/qux")]
#[case(&["", "foo", "", "qux", ""], "foo/qux")]
#[case(&["", "", ""], "")]
#[case(&["", "a", "b", ""], "a/b")]
#[case(&["single"], "single")]
#[case(&[], "")]
fn test_join_literals(#[case] components: &[&str], #[case] expected: &str) {
    // Inserted separators are native; a '/' inside a component is kept
    let joined = join(components.iter().copied());
    let normalized = joined.replace(SEPARATOR, "/");
    assert_eq!(normalized, expected);
}

#[test]
fn test_no_doubled_or_dangling_separators() {
    let inputs: [&[&str]; 4] = [
        &["", "x", ""],
        &["x", "", "", "y"],
        &["", "", "x", "y", "", ""],
        &["x", "y", "z"],
    ];
    for components in inputs {
        let joined = join(components.iter().copied());
        let doubled = format!("{SEPARATOR}{SEPARATOR}");
        assert!(!joined.contains(&doubled), "{joined}");
        assert!(!joined.starts_with(SEPARATOR), "{joined}");
        assert!(!joined.ends_with(SEPARATOR), "{joined}");
    }
}

#[test]
fn test_join_accepts_owned_components() {
    let parts = vec![String::from("foo"), String::new(), String::from("bar")];
    assert_eq!(join(&parts), format!("foo{SEPARATOR}bar"));
}

/// Every literal above in one pass, reporting completion like the original
/// join harness (visible with `--nocapture`)
#[test]
fn test_all_literals_in_sequence() {
    let native = |text: &str| text.replace('/', SEPARATOR);

    assert_eq!(join2("foo", "bar"), native("foo/bar"));
    assert_eq!(join2("", "a"), "a");
    assert_eq!(join2("a", ""), "a");
    assert_eq!(join(["foo", "bar", "qux"]), native("foo/bar/qux"));
    assert_eq!(join(["", "foo", "", "qux", ""]), native("foo/qux"));
    assert_eq!(join(["", "", ""]), "");
    assert_eq!(join(["", "a", "b", ""]), native("a/b"));

    println!("Tests completed.");
}
