//! Rewrites student notation into text the grammar accepts.
//!
//! The grammar requires explicit operators, while students write `2x` or
//! `3(x+1)`. [`normalize`] bridges the two without changing meaning, and is
//! the only place this cleanup happens.

use regex::Regex;
use std::sync::LazyLock;

static RE_DIGIT_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)([a-zA-Zπ])").expect("valid regex literal"));
static RE_CLOSE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)\(").expect("valid regex literal"));
static RE_DIGIT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\(").expect("valid regex literal"));
static RE_CLOSE_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)(\d)").expect("valid regex literal"));

/// Map a Unicode operator glyph to its ASCII form.
fn ascii_operator(c: char) -> Option<char> {
    match c {
        '×' | '·' | '⋅' | '∗' => Some('*'),
        '÷' => Some('/'),
        // minus sign, hyphen, non-breaking hyphen, figure/en/em dash
        '−' | '‐' | '‑' | '‒' | '–' | '—' => Some('-'),
        _ => None,
    }
}

/// Normalize a raw equation or expression string.
///
/// Total: never fails. Strips `$` math delimiters and all whitespace, maps
/// Unicode operators to ASCII and inserts the implicit multiplications
/// `2x → 2*x`, `)( → )*(`, `2( → 2*(` and `)2 → )*2`.
/// Running it on already normalized text returns the text unchanged.
pub fn normalize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && !c.is_whitespace())
        .map(|c| ascii_operator(c).unwrap_or(c))
        .collect();

    let step = RE_DIGIT_LETTER.replace_all(&cleaned, "${1}*${2}");
    let step = RE_CLOSE_OPEN.replace_all(&step, ")*(");
    let step = RE_DIGIT_OPEN.replace_all(&step, "${1}*(");
    let step = RE_CLOSE_DIGIT.replace_all(&step, ")*${1}");
    step.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_delimiters_and_whitespace() {
        assert_eq!(normalize("$$ x + 1 = 2 $$"), "x+1=2");
        assert_eq!(normalize("$x\t=\n3$"), "x=3");
    }

    #[test]
    fn maps_unicode_operators() {
        assert_eq!(normalize("6 × 2 ÷ 3"), "6*2/3");
        assert_eq!(normalize("a · b"), "a*b");
        assert_eq!(normalize("x − 1 – 2 — 3"), "x-1-2-3");
    }

    #[test]
    fn inserts_implicit_multiplication() {
        assert_eq!(normalize("2x + 3 = 7"), "2*x+3=7");
        assert_eq!(normalize("3(x+1)"), "3*(x+1)");
        assert_eq!(normalize("(x+1)(x-1)"), "(x+1)*(x-1)");
        assert_eq!(normalize("(x+1)2"), "(x+1)*2");
        assert_eq!(normalize("12ab"), "12*ab");
        assert_eq!(normalize("2sin(x)"), "2*sin(x)");
    }

    #[test]
    fn is_idempotent_on_normalized_text() {
        for raw in ["2x + 3 = 7", "3(x+1)(x-2)4", "$2π x$", "x^2 - 4 = 0"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw}");
        }
    }

    #[test]
    fn leaves_explicit_operators_alone() {
        assert_eq!(normalize("2*x"), "2*x");
        assert_eq!(normalize("x2"), "x2");
    }
}
