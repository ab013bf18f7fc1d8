//! Small text manglers applied before content goes out on the wire

/// Number of unicode scalar values in `text`.
///
/// Message limits are negotiated in characters, so sizing never uses byte
/// lengths.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Prefix of `text` holding at most `n` characters.
pub fn take_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// True when `text` cannot be sent in the GSM-compatible encoding, that is
/// when any code point is U+0080 or above.
pub fn is_unicode(text: &str) -> bool {
    !text.is_ascii()
}

/// Replace each whitespace sequence with a single space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Downgrade common typographic characters to ASCII look-alikes.
///
/// Dashes, quotes, and spacing characters that MediaWiki content picks up
/// from templates render poorly on handsets stuck with the GSM charset.
/// This does not strip all non-ASCII characters, just the usual suspects.
pub fn convert_unicode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => {
                out.push('-')
            }
            '\u{00a0}' | '\u{202f}' => out.push(' '),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201c}' | '\u{201d}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            _ => out.push(c),
        }
    }
    out
}

/// Run `text` through a pipeline of manglers, in order.
pub fn mangle_text(text: &str, manglers: &[fn(&str) -> String]) -> String {
    let mut text = text.to_string();
    for mangler in manglers {
        text = mangler(&text);
    }
    text
}
