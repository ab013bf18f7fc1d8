//! Numbered option menus
//!
//! Search results and section lists are shown as numbered lists the user
//! answers with a digit. A menu must fit one USSD screen, so options are
//! dropped from the end until the rendering fits; callers keep only the
//! options actually shown so replies can never reference a hidden one.

use minipedia_core::mangle::{char_len, take_chars};

/// Render `options` as a numbered list, one per line, counting from `start`.
pub fn render_menu(options: &[String], prefix: &str, start: usize) -> String {
    let lines: Vec<String> = options
        .iter()
        .enumerate()
        .map(|(offset, option)| format!("{}. {option}", start + offset))
        .collect();
    format!("{prefix}{}", lines.join("\n"))
}

/// Fit a numbered menu into `limit` characters.
///
/// Drops options from the end until the rendering fits or a single option
/// remains, then hard-slices the text as a last resort. Returns how many
/// options survived together with the rendered menu.
pub fn fit_menu(options: &[String], prefix: &str, limit: usize) -> (usize, String) {
    let mut shown = options.len();
    let mut rendered = render_menu(options, prefix, 1);
    while shown > 1 && char_len(&rendered) > limit {
        shown -= 1;
        rendered = render_menu(&options[..shown], prefix, 1);
    }
    (shown, take_chars(&rendered, limit).to_string())
}

/// Parse a reply to a menu of `count` options.
///
/// Accepts only ASCII digits; the selection is 1-based on screen, so `0`
/// and anything past `count` are rejected. Returns the 0-based index.
pub fn parse_selection(input: &str, count: usize) -> Option<usize> {
    let digits = input.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number: usize = digits.parse().ok()?;
    if number == 0 || number > count {
        return None;
    }
    Some(number - 1)
}
