/// Whether `text` is acceptable as a city name.
///
/// The trimmed text must be non-empty and contain only ASCII letters and
/// whitespace. Hyphens and apostrophes are rejected ("Stratford-upon-Avon",
/// "L'Aquila").
pub fn is_valid_city(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

/// Whether `text` has anything left after trimming.
///
/// The page controller gates on this looser check, the form on [`is_valid_city`].
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
