// Display order for merged guests: favorites first, then by name.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::domain::MergedGuest;

/// Sorts in place. The sort is stable, so guests that compare equal keep the
/// order the server returned them in.
pub fn sort_guests(guests: &mut [MergedGuest]) {
    guests.sort_by(compare_guests);
}

/// Favorited before not favorited; within a group by collated name, with
/// unnamed guests after every named one.
pub fn compare_guests(a: &MergedGuest, b: &MergedGuest) -> Ordering {
    b.favorited()
        .cmp(&a.favorited())
        .then_with(|| compare_names(a.guest.display_name(), b.guest.display_name()))
}

fn compare_names(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => collate(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Locale-style comparison in three strengths: base letters ignoring accents and
/// case, then accents, then case with lowercase first. Only identical strings
/// compare equal.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

fn primary_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn secondary_key(value: &str) -> String {
    value.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_key(value: &str) -> Vec<u8> {
    value
        .nfd()
        .map(|c| if c.is_uppercase() { 1 } else { 0 })
        .collect()
}
