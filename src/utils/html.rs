//! HTML whitespace-collapse minification.

/// Collapse whitespace in HTML markup.
///
/// Runs of whitespace become a single space and inter-tag whitespace is
/// dropped entirely. `<pre>`/`<textarea>` content is left untouched.
pub fn collapse_whitespace(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = find_preserved_open(rest) {
        let (before, preserved_on) = rest.split_at(start);
        collapse_into(&mut out, before);

        // Copy the preserved block verbatim, through its closing tag.
        let end = find_preserved_close(preserved_on).unwrap_or(preserved_on.len());
        out.push_str(&preserved_on[..end]);
        rest = &preserved_on[end..];
    }

    collapse_into(&mut out, rest);
    out
}

/// Byte offset of the next `<pre` or `<textarea` open tag.
fn find_preserved_open(html: &str) -> Option<usize> {
    let lower = html.to_ascii_lowercase();
    let pre = lower.find("<pre");
    let textarea = lower.find("<textarea");
    match (pre, textarea) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Byte offset just past the matching `</pre>` or `</textarea>`.
fn find_preserved_close(html: &str) -> Option<usize> {
    let lower = html.to_ascii_lowercase();
    let close = if lower.starts_with("<pre") {
        "</pre>"
    } else {
        "</textarea>"
    };
    lower.find(close).map(|pos| pos + close.len())
}

/// Collapse whitespace runs; drop them entirely between `>` and `<`.
fn collapse_into(out: &mut String, html: &str) {
    let mut pending_space = false;

    for ch in html.chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            // Whitespace directly between two tags is layout indentation.
            if !(out.ends_with('>') && ch == '<') && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
        }
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_between_tags() {
        let html = "<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>";
        assert_eq!(
            collapse_whitespace(html),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn test_collapse_inline_text() {
        let html = "<p>hello\n   world</p>";
        assert_eq!(collapse_whitespace(html), "<p>hello world</p>");
    }

    #[test]
    fn test_preserves_pre_blocks() {
        let html = "<div>\n  <pre>  keep\n  this  </pre>\n</div>";
        assert_eq!(
            collapse_whitespace(html),
            "<div><pre>  keep\n  this  </pre></div>"
        );
    }

    #[test]
    fn test_idempotent() {
        let html = "<main>\n  <h1>Title</h1>\n</main>";
        let once = collapse_whitespace(html);
        assert_eq!(collapse_whitespace(&once), once);
    }
}
