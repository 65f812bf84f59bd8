/// Truncate an element snippet to at most `max` characters, keeping the
/// opening and closing halves so the tag and its attributes stay visible.
/// Splits on char boundaries only.
pub fn truncate_snippet(html: &str, max: usize) -> String {
    if html.chars().count() <= max {
        return html.to_string();
    }
    let half = max / 2;
    let head: String = html.chars().take(half).collect();
    let tail_start = html.chars().count() - half;
    let tail: String = html.chars().skip(tail_start).collect();
    format!("{}\u{2026}{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_snippet_unchanged() {
        assert_eq!(truncate_snippet("<img src=\"a.png\">", 300), "<img src=\"a.png\">");
    }

    #[test]
    fn test_long_snippet_truncated() {
        let html = format!("<div>{}</div>", "x".repeat(500));
        let out = truncate_snippet(&html, 100);
        assert!(out.chars().count() <= 101);
        assert!(out.starts_with("<div>"));
        assert!(out.ends_with("</div>"));
        assert!(out.contains('\u{2026}'));
    }

    #[test]
    fn test_multibyte_content_safe() {
        let html = format!("<p>{}</p>", "é".repeat(400));
        let out = truncate_snippet(&html, 50);
        assert!(out.contains('\u{2026}'));
    }
}
