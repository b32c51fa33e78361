//! Text escaping for HTML embedding and URL query strings.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

/// Escape text for embedding in HTML element content or attribute values.
///
/// Every field read from the spreadsheet goes through this before it is
/// interpolated into markup, so titles containing `<`, `>`, or `&` render
/// literally instead of corrupting the page.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Percent-encode a title for use as a search query parameter.
pub fn encode_query(s: &str) -> String {
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}

/// Escape text for embedding inside a single-quoted JavaScript string.
pub fn js_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            html_escape(r#"<b>A & "B"</b>"#),
            "&lt;b&gt;A &amp; &quot;B&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn escape_order_does_not_double_escape() {
        // The ampersand pass runs first, so entities produced by later
        // passes must not be re-escaped.
        assert_eq!(html_escape("<"), "&lt;");
        assert_eq!(html_escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn query_roundtrip() {
        let encoded = encode_query("A & B?");
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('&'));

        let decoded = percent_decode_str(&encoded)
            .decode_utf8()
            .expect("valid utf-8");
        assert_eq!(decoded, "A & B?");
    }

    #[test]
    fn query_roundtrip_non_ascii() {
        let title = "钙钛矿太阳能电池研究进展";
        let encoded = encode_query(title);
        let decoded = percent_decode_str(&encoded)
            .decode_utf8()
            .expect("valid utf-8");
        assert_eq!(decoded, title);
    }

    #[test]
    fn js_string_is_inert() {
        assert_eq!(js_string("It's"), "It\\'s");
        assert_eq!(js_string("</script>"), "<\\/script>");
    }
}
