use unicode_normalization::UnicodeNormalization;

/// Folds a label to ASCII by decomposing it (NFKD) and dropping every
/// non-ASCII code point: "Côte d'Ivoire" becomes "Cote d'Ivoire".
///
/// Grouping always runs on folded labels, so two spellings of the same
/// country that differ only in their byte encoding land in one group.
pub fn normalize_label(label: &str) -> String {
    label.nfkd().filter(char::is_ascii).collect()
}

/// Folded and lowercased, for case- and accent-insensitive searches.
pub fn search_key(text: &str) -> String {
    normalize_label(text).to_ascii_lowercase()
}
