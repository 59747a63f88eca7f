//! Text-level path joining
//!
//! Components are concatenated with exactly one separator between
//! consecutive non-empty components. Empty components contribute nothing,
//! so no leading, trailing or doubled separator can appear.

pub use pfs_sys::encoding::SEPARATOR_STR as SEPARATOR;

/// Join any number of components
///
/// ```
/// use portable_fs::join::join;
///
/// let sep = portable_fs::join::SEPARATOR;
/// assert_eq!(join(["", "foo", "", "qux", ""]), format!("foo{sep}qux"));
/// assert_eq!(join(["", "", ""]), "");
/// ```
#[must_use]
pub fn join<I>(components: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut joined = String::new();
    for component in components {
        let component = component.as_ref();
        if component.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push_str(SEPARATOR);
        }
        joined.push_str(component);
    }
    joined
}

/// Join exactly two components
#[must_use]
pub fn join2(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_owned(),
        (false, true) => a.to_owned(),
        (false, false) => {
            let mut joined = String::with_capacity(a.len() + SEPARATOR.len() + b.len());
            joined.push_str(a);
            joined.push_str(SEPARATOR);
            joined.push_str(b);
            joined
        }
    }
}
