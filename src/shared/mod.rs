pub mod time;

pub use time::*;

/// Returns the first candidate that is non-empty once trimmed.
pub fn first_available<I, S>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    candidates.into_iter().flatten().find_map(|candidate| {
        let value = candidate.as_ref().trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}

#[test]
fn first_available_skips_blank() {
    let value = first_available([None, Some("  "), Some(" 42 "), Some("x")]);
    assert_eq!(value.as_deref(), Some("42"));
}

#[test]
fn first_available_none_when_all_blank() {
    let value: Option<String> = first_available([None::<&str>, Some("")]);
    assert!(value.is_none());
}
