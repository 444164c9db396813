use unicode_normalization::UnicodeNormalization;

/// Unicode dash and connector punctuation that NFKC leaves in place.
const fn is_dash_or_connector(c: char) -> bool {
    matches!(
        c,
        '\u{058A}'
            | '\u{05BE}'
            | '\u{1400}'
            | '\u{1806}'
            | '\u{2010}'..='\u{2015}'
            | '\u{203F}'
            | '\u{2040}'
            | '\u{2054}'
            | '\u{2E17}'
            | '\u{2E1A}'
            | '\u{2E3A}'
            | '\u{2E3B}'
            | '\u{2E40}'
            | '\u{301C}'
            | '\u{3030}'
            | '\u{30A0}'
    )
}

/// Punctuation that survives sanitizing. ASCII symbols such as `$`, `+` and
/// `|` are dropped along with emoji and other symbol characters.
const fn is_kept_punctuation(c: char) -> bool {
    is_dash_or_connector(c)
        || matches!(
            c,
            '!' | '"'
                | '#'
                | '%'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | ','
                | '-'
                | '.'
                | '/'
                | ':'
                | ';'
                | '?'
                | '@'
                | '['
                | '\\'
                | ']'
                | '_'
                | '{'
                | '}'
                | '\u{00B7}'
                | '\u{2018}'
                | '\u{2019}'
                | '\u{201C}'
                | '\u{201D}'
        )
}

/// Cleans a raw extracted value before it is classified or validated.
///
/// Applies NFKC normalization, removes control characters, emoji and symbol
/// characters, collapses whitespace runs to a single space and trims.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    let filtered: String = raw
        .nfkc()
        .filter(|&c| c.is_alphanumeric() || c.is_whitespace() || is_kept_punctuation(c))
        .collect();

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}
