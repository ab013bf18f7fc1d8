//! Message-sized content formatting
//!
//! USSD and SMS messages carry different character budgets depending on the
//! encoding the gateway picks, so the formatter keeps one limit for
//! GSM-compatible text and a tighter one for anything containing non-ASCII.
//! Truncation prefers word boundaries, falls back to a hard cut for
//! unbreakable runs, and can snap back to a sentence boundary when one ends
//! close enough to the cut. All limits and offsets count unicode scalar
//! values, never bytes.

use crate::error::{FormatError, FormatResult};
use crate::mangle::{char_len, is_unicode, take_chars};

/// Fits article content into single messages.
///
/// Holds the two encoding-dependent limits and the decorations used when
/// content is cut: `pre_ellipsis` opens a continued message, `post_ellipsis`
/// closes a truncated one.
#[derive(Debug, Clone)]
pub struct ContentFormatter {
    ascii_limit: usize,
    unicode_limit: usize,
    pre_ellipsis: String,
    post_ellipsis: String,
    sentence_break_threshold: usize,
}

/// Outcome of a truncation: how much source text was kept and the rendered
/// message including decorations.
struct Truncated {
    body_chars: usize,
    rendered: String,
}

impl ContentFormatter {
    /// Create a formatter with the given ASCII and unicode character limits.
    ///
    /// Defaults: `"..."` continuation prefix, `" ..."` truncation suffix,
    /// sentence break threshold of 10.
    pub fn new(ascii_limit: usize, unicode_limit: usize) -> Self {
        ContentFormatter {
            ascii_limit,
            unicode_limit,
            pre_ellipsis: "...".to_string(),
            post_ellipsis: " ...".to_string(),
            sentence_break_threshold: 10,
        }
    }

    /// Replace the prefix marking a continued message.
    pub fn pre_ellipsis(mut self, pre_ellipsis: impl Into<String>) -> Self {
        self.pre_ellipsis = pre_ellipsis.into();
        self
    }

    /// Replace the suffix marking a truncated message.
    pub fn post_ellipsis(mut self, post_ellipsis: impl Into<String>) -> Self {
        self.post_ellipsis = post_ellipsis.into();
        self
    }

    /// Re-cut at a sentence boundary ending within `threshold` characters of
    /// a word-boundary cut. Zero disables the re-cut.
    pub fn sentence_break_threshold(mut self, threshold: usize) -> Self {
        self.sentence_break_threshold = threshold;
        self
    }

    /// The character limit governing `text`: the unicode limit as soon as
    /// any code point is outside ASCII.
    pub fn limit_for(&self, text: &str) -> usize {
        if is_unicode(text) {
            self.unicode_limit
        } else {
            self.ascii_limit
        }
    }

    /// Fit `content` plus a mandatory `postfix` into one message.
    ///
    /// Content short enough passes through untouched. Anything longer is cut
    /// at a word boundary and rendered with the truncation suffix ahead of
    /// the postfix.
    pub fn format(&self, content: &str, postfix: &str) -> FormatResult<String> {
        let limit = self.limit_for(content);
        if char_len(content) + char_len(postfix) <= limit {
            return Ok(format!("{content}{postfix}"));
        }
        let cut = self.truncate_to_fit(content, limit, postfix)?;
        Ok(cut.rendered)
    }

    /// Format one message of a longer text, resuming `offset` characters in.
    ///
    /// Continued messages open with the continuation prefix. The last
    /// message carries `no_more`, every earlier one `more`. Returns the
    /// number of source characters consumed (prefix overhead excluded) along
    /// with the rendered message; the next call resumes at
    /// `offset + consumed + 1`, stepping over the whitespace at the cut.
    pub fn format_more(
        &self,
        content: &str,
        offset: usize,
        more: &str,
        no_more: &str,
    ) -> FormatResult<(usize, String)> {
        let window = skip_chars(content, offset);
        let (etext, extra) = if offset > 0 {
            (format!("{}{window}", self.pre_ellipsis), char_len(&self.pre_ellipsis))
        } else {
            (window.to_string(), 0)
        };
        let limit = self.limit_for(&etext);
        if char_len(&etext) + char_len(no_more) <= limit {
            let consumed = char_len(&etext) - extra;
            return Ok((consumed, format!("{etext}{no_more}")));
        }
        let cut = self.truncate_to_fit(&etext, limit, more)?;
        Ok((cut.body_chars.saturating_sub(extra), cut.rendered))
    }

    /// Cut `text` so that it fits `limit` together with the truncation
    /// suffix and `postfix`, dropping whole words from the end first.
    fn truncate_to_fit(&self, text: &str, limit: usize, postfix: &str) -> FormatResult<Truncated> {
        let suffix_len = char_len(&self.post_ellipsis) + char_len(postfix);
        if suffix_len > limit {
            return Err(FormatError::PostfixTooLong {
                needed: suffix_len,
                limit,
            });
        }
        let max_body = limit - suffix_len;

        let mut body = text;
        let mut body_len = char_len(body);
        while body_len > max_body {
            match drop_last_word(body) {
                Some(shorter) => {
                    body = shorter;
                    body_len = char_len(body);
                }
                None => {
                    // A single unbreakable run gets a hard character cut.
                    body = take_chars(body, max_body);
                    body_len = char_len(body);
                    break;
                }
            }
        }

        if self.sentence_break_threshold > 0 {
            if let Some(idx) = body.rfind(". ") {
                if char_len(&body[idx..]) <= self.sentence_break_threshold {
                    let body = &body[..idx + 1];
                    return Ok(Truncated {
                        body_chars: char_len(body),
                        rendered: format!("{body}{postfix}"),
                    });
                }
            }
        }

        Ok(Truncated {
            body_chars: body_len,
            rendered: format!("{}{}{postfix}", body, self.post_ellipsis),
        })
    }
}

/// Remove the final whitespace-delimited word.
///
/// Trailing whitespace never counts as a word. Returns `None` when nothing
/// precedes the last word, leaving the hard cut to the caller.
fn drop_last_word(text: &str) -> Option<&str> {
    let text = text.trim_end();
    let cut = text.rfind(char::is_whitespace)?;
    let head = text[..cut].trim_end();
    if head.is_empty() {
        None
    } else {
        Some(head)
    }
}

/// Drop the first `n` characters of `text`.
fn skip_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

/// Splits content into a sequence of messages, tracking the resume offset.
///
/// Each chunk advances the offset by the consumed characters plus the one
/// whitespace character stepped over at the cut, so offsets persisted
/// between messages resume cleanly with [`Paginator::resume`]. The sequence
/// ends after the chunk that carried the `no_more` suffix; empty content
/// still yields that one terminal chunk.
#[derive(Debug)]
pub struct Paginator<'a> {
    formatter: &'a ContentFormatter,
    content: &'a str,
    content_len: usize,
    offset: usize,
    more: &'a str,
    no_more: &'a str,
    finished: bool,
}

impl<'a> Paginator<'a> {
    /// Start paginating `content` from the beginning.
    pub fn new(
        formatter: &'a ContentFormatter,
        content: &'a str,
        more: &'a str,
        no_more: &'a str,
    ) -> Self {
        Self::resume(formatter, content, 0, more, no_more)
    }

    /// Continue paginating from a previously persisted character offset.
    pub fn resume(
        formatter: &'a ContentFormatter,
        content: &'a str,
        offset: usize,
        more: &'a str,
        no_more: &'a str,
    ) -> Self {
        Paginator {
            formatter,
            content,
            content_len: char_len(content),
            offset,
            more,
            no_more,
            finished: false,
        }
    }

    /// Format the next message and advance the offset.
    pub fn next_chunk(&mut self) -> Option<FormatResult<String>> {
        if self.finished {
            return None;
        }
        match self
            .formatter
            .format_more(self.content, self.offset, self.more, self.no_more)
        {
            Ok((consumed, text)) => {
                self.offset += consumed + 1;
                if self.offset >= self.content_len {
                    self.finished = true;
                }
                Some(Ok(text))
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }

    /// Character offset the next chunk would resume from.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// True once the terminal chunk has been produced.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Iterator for Paginator<'_> {
    type Item = FormatResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_chunk()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNI_BIT: &str = "\u{44d}\u{442}\u{43e}";

    fn long_ascii(bits: usize, suffix: &str) -> String {
        let mut text = vec!["abc"; bits].join(" ");
        text.push_str(suffix);
        text
    }

    fn long_unicode(bits: usize, suffix: &str) -> String {
        let mut text = vec![UNI_BIT; bits].join(" ");
        text.push_str(suffix);
        text
    }

    fn formatter() -> ContentFormatter {
        ContentFormatter::new(160, 70)
    }

    #[test]
    fn test_format_simple() {
        let cf = formatter();
        assert_eq!(cf.format("", "").unwrap(), "");
        assert_eq!(cf.format("a", "").unwrap(), "a");
        assert_eq!(cf.format(UNI_BIT, "").unwrap(), UNI_BIT);
        assert_eq!(
            cf.format(&long_ascii(50, ""), "").unwrap(),
            long_ascii(39, " ...")
        );
        assert_eq!(
            cf.format(&long_unicode(50, ""), "").unwrap(),
            long_unicode(16, " ...")
        );
    }

    #[test]
    fn test_format_postfix() {
        let cf = formatter();
        assert_eq!(cf.format("", " (postfix)").unwrap(), " (postfix)");
        assert_eq!(cf.format("a", " (postfix)").unwrap(), "a (postfix)");
        assert_eq!(
            cf.format(UNI_BIT, " (postfix)").unwrap(),
            format!("{UNI_BIT} (postfix)")
        );
        assert_eq!(
            cf.format(&long_ascii(50, ""), " (postfix)").unwrap(),
            long_ascii(36, " ... (postfix)")
        );
        assert_eq!(
            cf.format(&long_unicode(50, ""), " (postfix)").unwrap(),
            long_unicode(14, " ... (postfix)")
        );
    }

    #[test]
    fn test_format_more() {
        let cf = formatter();
        let fmt = |text: &str, offset| cf.format_more(text, offset, " (more)", " (no more)").unwrap();

        assert_eq!(fmt("", 0), (0, " (no more)".to_string()));
        assert_eq!(fmt("a", 0), (1, "a (no more)".to_string()));
        assert_eq!(fmt(UNI_BIT, 0), (3, format!("{UNI_BIT} (no more)")));
        assert_eq!(fmt("a a", 2), (1, "...a (no more)".to_string()));
        assert_eq!(
            fmt(&long_unicode(2, ""), 4),
            (3, format!("...{UNI_BIT} (no more)"))
        );

        assert_eq!(
            fmt(&long_ascii(50, ""), 0),
            (147, long_ascii(37, " ... (more)"))
        );
        assert_eq!(
            fmt(&long_unicode(50, ""), 0),
            (59, long_unicode(15, " ... (more)"))
        );

        assert_eq!(
            fmt(&long_ascii(50, ""), 4),
            (143, format!("...{}", long_ascii(36, " ... (more)")))
        );
        assert_eq!(
            fmt(&long_unicode(50, ""), 4),
            (55, format!("...{}", long_unicode(14, " ... (more)")))
        );
    }

    #[test]
    fn test_limit_chosen_per_text() {
        let cf = formatter();
        assert_eq!(cf.limit_for("plain"), 160);
        assert_eq!(cf.limit_for(UNI_BIT), 70);
        assert_eq!(cf.limit_for(""), 160);
    }

    #[test]
    fn test_unbreakable_word_hard_cut() {
        let cf = ContentFormatter::new(10, 5);
        assert_eq!(cf.format("abcdefghijklmno", "").unwrap(), "abcdef ...");
    }

    #[test]
    fn test_postfix_too_long() {
        let cf = ContentFormatter::new(10, 5);
        let err = cf.format("some longer text", " (a very long postfix)").unwrap_err();
        match err {
            FormatError::PostfixTooLong { needed, limit } => {
                assert_eq!(needed, 26);
                assert_eq!(limit, 10);
            }
        }
    }

    #[test]
    fn test_suffix_exactly_filling_limit() {
        let cf = ContentFormatter::new(4, 4);
        assert_eq!(cf.format("toolong x", "").unwrap(), " ...");
    }

    #[test]
    fn test_sentence_break_recut() {
        let cf = ContentFormatter::new(30, 30);
        let content = "Alpha beta gamma. Delta epsilon zeta";
        assert_eq!(cf.format(content, "").unwrap(), "Alpha beta gamma.");
    }

    #[test]
    fn test_sentence_break_disabled() {
        let cf = ContentFormatter::new(30, 30).sentence_break_threshold(0);
        let content = "Alpha beta gamma. Delta epsilon zeta";
        assert_eq!(cf.format(content, "").unwrap(), "Alpha beta gamma. Delta ...");
    }

    #[test]
    fn test_sentence_break_out_of_range() {
        let cf = ContentFormatter::new(40, 40);
        let content = "One two three. Four five six seven eight nine.";
        assert_eq!(
            cf.format(content, "").unwrap(),
            "One two three. Four five six seven ..."
        );
    }

    #[test]
    fn test_format_more_resumes_after_sentence_break() {
        let cf = ContentFormatter::new(30, 20);
        let content = "Alpha beta gamma. Delta epsilon zeta";
        let (consumed, text) = cf.format_more(content, 0, " >", " end").unwrap();
        assert_eq!((consumed, text.as_str()), (17, "Alpha beta gamma. >"));
        let (consumed, text) = cf.format_more(content, consumed + 1, " >", " end").unwrap();
        assert_eq!((consumed, text.as_str()), (18, "...Delta epsilon zeta end"));
    }

    #[test]
    fn test_custom_ellipses() {
        let cf = ContentFormatter::new(12, 12).pre_ellipsis(">>").post_ellipsis("~");
        let (consumed, text) = cf.format_more("aaa bbb ccc ddd", 4, "+", "-").unwrap();
        assert_eq!(text, ">>bbb ccc~+");
        assert_eq!(consumed, 7);
    }

    #[test]
    fn test_paginator_walks_content_to_the_end() {
        let cf = ContentFormatter::new(30, 20);
        let content = "Alpha beta gamma. Delta epsilon zeta";
        let pager = Paginator::new(&cf, content, " >", " end");
        let chunks: Vec<String> = pager.collect::<FormatResult<_>>().unwrap();
        assert_eq!(chunks, vec!["Alpha beta gamma. >", "...Delta epsilon zeta end"]);
    }

    #[test]
    fn test_paginator_empty_content_yields_one_chunk() {
        let cf = formatter();
        let mut pager = Paginator::new(&cf, "", " (more)", " (no more)");
        assert_eq!(pager.next_chunk().unwrap().unwrap(), " (no more)");
        assert!(pager.is_finished());
        assert!(pager.next_chunk().is_none());
    }

    #[test]
    fn test_paginator_resume_matches_uninterrupted_run() {
        let cf = ContentFormatter::new(20, 20);
        let content = "one two three four five six seven eight nine ten";

        let mut first = Paginator::new(&cf, content, " +", " .");
        let opening = first.next_chunk().unwrap().unwrap();
        let saved = first.offset();

        let rest: Vec<String> = Paginator::resume(&cf, content, saved, " +", " .")
            .collect::<FormatResult<_>>()
            .unwrap();

        let mut full: Vec<String> = vec![opening];
        full.extend(rest);
        let uninterrupted: Vec<String> = Paginator::new(&cf, content, " +", " .")
            .collect::<FormatResult<_>>()
            .unwrap();
        assert_eq!(full, uninterrupted);
    }

    #[test]
    fn test_paginator_covers_every_word() {
        let cf = ContentFormatter::new(20, 20);
        let content = "one two three four five six seven eight nine ten";
        let chunks: Vec<String> = Paginator::new(&cf, content, " +", " .")
            .collect::<FormatResult<_>>()
            .unwrap();
        let mut reassembled = String::new();
        for chunk in &chunks {
            let body = chunk
                .trim_start_matches("...")
                .trim_end_matches(" +")
                .trim_end_matches(" .")
                .trim_end_matches(" ...");
            if !reassembled.is_empty() {
                reassembled.push(' ');
            }
            reassembled.push_str(body);
        }
        assert_eq!(reassembled, content);
    }

    #[test]
    fn test_paginator_hard_cut_advance_skips_one_character() {
        let cf = ContentFormatter::new(8, 8);
        let mut pager = Paginator::new(&cf, "abcdefghij xyz", "+", "-");
        assert_eq!(pager.next_chunk().unwrap().unwrap(), "abc ...+");
        assert_eq!(pager.offset(), 4);
    }
}
