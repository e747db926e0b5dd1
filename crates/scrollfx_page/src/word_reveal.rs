//! Word-by-word reveal
//!
//! A text block is split on whitespace and each word wrapped as
//! `<span class="word"><span>word</span></span>`, with single spaces in
//! between. The outer span clips, the inner span is what gets animated.

use std::str::SplitWhitespace;

use scrollfx_core::dom::escape_html;
use scrollfx_core::{Document, NodeId};

/// Words of `text`, lazily; runs of whitespace collapse
pub fn split_words(text: &str) -> SplitWhitespace<'_> {
    text.split_whitespace()
}

/// Markup for a sequence of words
pub fn render_markup<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for (i, word) in words.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str("<span class=\"word\"><span>");
        out.push_str(&escape_html(word));
        out.push_str("</span></span>");
    }
    out
}

/// Replace the text of `container` with wrapped words.
///
/// Returns the inner spans in reading order.
pub fn wrap_words(doc: &mut Document, container: NodeId) -> Vec<NodeId> {
    let text = doc.text_content(container);
    doc.clear_children(container);

    let mut inners = Vec::new();
    for (i, word) in split_words(&text).enumerate() {
        if i > 0 {
            doc.append_text(container, " ");
        }
        let outer = doc.append_element(container, "span");
        doc.add_class(outer, "word");
        let inner = doc.append_element(outer, "span");
        doc.append_text(inner, word);
        inners.push(inner);
    }

    tracing::debug!(words = inners.len(), "text wrapped for word reveal");
    inners
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_tags(markup: &str) -> String {
        let mut out = String::new();
        let mut in_tag = false;
        for c in markup.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => out.push(c),
                _ => {}
            }
        }
        out.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_split_collapses_whitespace() {
        let words: Vec<_> = split_words("  scroll\n\tis   the\u{a0}new  click ").collect();
        assert_eq!(words, vec!["scroll", "is", "the", "new", "click"]);
        assert_eq!(split_words("").count(), 0);
        assert_eq!(split_words(" \n ").count(), 0);
    }

    #[test]
    fn test_markup_round_trip() {
        let text = "Motion  should\nfeel <earned> & \"honest\"";
        let markup = render_markup(split_words(text));
        let normalized: Vec<_> = split_words(text).collect();
        assert_eq!(strip_tags(&markup), normalized.join(" "));
        assert!(markup.contains("&lt;earned&gt;"));
    }

    #[test]
    fn test_wrap_words_builds_tree() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.body(), "p");
        doc.set_id(p, "reveal-text");
        doc.append_text(p, "Every   pixel\nmoves");

        let inners = wrap_words(&mut doc, p);
        assert_eq!(inners.len(), 3);
        assert_eq!(doc.text_content(inners[1]), "pixel");
        assert_eq!(doc.inner_html(p), render_markup(["Every", "pixel", "moves"]));
        assert_eq!(doc.query_all("#reveal-text .word span").unwrap(), inners);
    }

    #[test]
    fn test_empty_container() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.body(), "p");
        assert!(wrap_words(&mut doc, p).is_empty());
        assert_eq!(doc.inner_html(p), "");
    }
}
