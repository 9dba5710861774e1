use regex::{Captures, Regex};
use std::sync::OnceLock;

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").expect("valid regex")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"))
}

fn entity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid regex"))
}

/// Converts an HTML fragment to plain text: tags become spaces, entities are
/// decoded and whitespace runs collapse to one space.
pub fn clean_html(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let without_scripts = script_re().replace_all(html, " ");
    let without_tags = tag_re().replace_all(&without_scripts, " ");
    let decoded = entity_re().replace_all(&without_tags, |caps: &Captures| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    let decoded = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "rsquo" => "\u{2019}",
        "lsquo" => "\u{2018}",
        "rdquo" => "\u{201d}",
        "ldquo" => "\u{201c}",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        _ => return None,
    };
    Some(decoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_with_separator() {
        let html = "<p>Build <strong>Rust</strong> services</p><ul><li>AWS</li><li>Docker</li></ul>";
        assert_eq!(clean_html(html), "Build Rust services AWS Docker");
    }

    #[test]
    fn test_decodes_entities() {
        assert_eq!(
            clean_html("R&amp;D&nbsp;team &lt;3 &#8212; caf&#xe9; &bogus;"),
            "R&D team <3 \u{2014} caf\u{e9} &bogus;"
        );
    }

    #[test]
    fn test_drops_scripts_and_styles() {
        let html = "<style>p { color: red }</style><p>Hello</p><script>alert('x')</script>";
        assert_eq!(clean_html(html), "Hello");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_html(""), "");
        assert_eq!(clean_html("   "), "");
    }
}
