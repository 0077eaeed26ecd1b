use std::sync::LazyLock;

use regex::Regex;

/// Minimum cleaned length for a usable name guess.
const MIN_NAME_LEN: usize = 2;

static RE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.[^/.]+$").unwrap());
static RE_FORM_W2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)w[-_\s]?2").unwrap());
static RE_FORM_1099: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)1099[-_\s]?(int|div|misc|nec|b)").unwrap());
static RE_FORM_SCHEDULE_C: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)schedule[-_\s]?c").unwrap());
static RE_TAX_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"20[2-3][0-9]").unwrap());
static RE_NOISE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[-_\s]*(copy|final|scan|signed|v\d+)").unwrap());
static RE_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]+").unwrap());

/// Best-effort payer/employer/vendor name recovery from a filename like
/// `W2_AcmeCorp_2024.pdf`.
///
/// Strips the extension, form-code tokens, tax years and common noise
/// suffixes, then title-cases whatever survives. Returns None when fewer
/// than two characters remain — the designed "no confident guess" signal.
pub fn extract_name(filename: &str) -> Option<String> {
    let base = RE_EXTENSION.replace(filename, "");

    let cleaned = RE_FORM_W2.replace_all(&base, "");
    let cleaned = RE_FORM_1099.replace_all(&cleaned, "");
    let cleaned = RE_FORM_SCHEDULE_C.replace_all(&cleaned, "");
    let cleaned = RE_TAX_YEAR.replace_all(&cleaned, "");
    let cleaned = RE_NOISE_SUFFIX.replace_all(&cleaned, "");
    let cleaned = RE_SEPARATORS.replace_all(&cleaned, " ");
    let cleaned = cleaned.trim();

    if cleaned.chars().count() < MIN_NAME_LEN {
        return None;
    }

    Some(
        cleaned
            .split_whitespace()
            .map(capitalize_word)
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Uppercase the first character, lowercase the rest.
fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
