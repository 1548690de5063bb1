// src/core/html.rs
// Low-level HTML string manipulation helpers.
// Deliberately naive, but tailored to the service authorization reference
// markup. They operate case-insensitively on ASCII tag/attribute names.

/// Find the next complete element block for `tag` from `from` onwards,
/// case-insensitive. A block runs from the start of the opening tag to the
/// end of the closing tag.
///
/// The tag name must end exactly at a delimiter, so scanning for `th` does
/// not stop at `<thead>`.
///
/// Example: `next_tag_block_ci(s, "td", 0)` → `<td rowspan="3"> ... </td>`
pub fn next_tag_block_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open_pat = join!("<", &to_lower(tag));
    let close_pat = join!("</", &to_lower(tag));

    let start = find_exact_tag(&lc, &open_pat, from)?;
    // Jump past the end of the opening tag
    let open_end = s[start..].find('>')? + start + 1;
    // Find the matching closing tag, with the same exact-name rule
    let close_at = find_exact_tag(&lc, &close_pat, open_end)?;
    let end = s[close_at..].find('>')? + close_at + 1;
    Some((start, end))
}

/// Locate `pat` at a position where the tag name ends in whitespace or '>'.
fn find_exact_tag(lc: &str, pat: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        let at = lc.get(pos..)?.find(pat)? + pos;
        match lc.as_bytes().get(at + pat.len()) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' => return Some(at),
            None => return None,
            _ => pos = at + pat.len(),
        }
    }
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return the INNER text without the wrapping tags (still may contain nested tags).
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(open_end) = block.find('>') {
        if let Some(close_start) = block.rfind('<') {
            if close_start > open_end {
                return block[open_end + 1..close_start].to_string();
            }
        }
    }
    String::new()
}

/// Read an attribute value from a block's opening tag, e.g.
/// `attr_ci("<td rowspan=\"3\">x</td>", "rowspan")` → `Some("3")`.
/// Handles bare, single- and double-quoted values.
pub fn attr_ci(block: &str, name: &str) -> Option<String> {
    let open = &block[..block.find('>')?];
    let lc = to_lower(open);
    let name_lc = to_lower(name);
    let bytes = open.as_bytes();

    let mut from = 0;
    loop {
        let at = lc.get(from..)?.find(&name_lc)? + from;
        let mut eq = at + name_lc.len();
        while eq < open.len() && bytes[eq].is_ascii_whitespace() {
            eq += 1;
        }
        // Must be a standalone attribute name followed by '='
        if at == 0
            || !bytes[at - 1].is_ascii_whitespace()
            || eq >= open.len()
            || bytes[eq] != b'='
        {
            from = at + name_lc.len();
            continue;
        }
        let mut v = eq + 1;
        while v < open.len() && bytes[v].is_ascii_whitespace() {
            v += 1;
        }
        let rest = &open[v..];
        return match rest.as_bytes().first() {
            Some(&q) if q == b'"' || q == b'\'' => {
                let rest = &rest[1..];
                match rest.find(q as char) {
                    Some(end) => Some(rest[..end].to_string()),
                    None => Some(rest.to_string()),
                }
            }
            Some(_) => rest.split_ascii_whitespace().next().map(str::to_string),
            None => None,
        };
    }
}

/// Remove all HTML tags `<...>` from the string, then collapse whitespace.
pub fn strip_tags(s: String) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Minimal HTML entity decoding for the handful the reference pages use.
/// `&amp;` goes last so it never double-decodes.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapse sequences of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Fast ASCII-only lowercasing for tag/attribute matching.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_block_requires_exact_name() {
        let html = "<thead><tr><th>Actions</th></tr></thead>";
        // "th" must not match "<thead"
        let (s, e) = next_tag_block_ci(html, "th", 0).unwrap();
        assert_eq!(&html[s..e], "<th>Actions</th>");
    }

    #[test]
    fn tag_block_is_case_insensitive() {
        let html = "junk <TD ROWSPAN=2>text</TD> tail";
        let (s, e) = next_tag_block_ci(html, "td", 0).unwrap();
        assert_eq!(&html[s..e], "<TD ROWSPAN=2>text</TD>");
    }

    #[test]
    fn tag_block_scans_forward_from_offset() {
        let html = "<td>a</td><td>b</td>";
        let (s1, e1) = next_tag_block_ci(html, "td", 0).unwrap();
        let (s2, e2) = next_tag_block_ci(html, "td", e1).unwrap();
        assert_eq!(&html[s1..e1], "<td>a</td>");
        assert_eq!(&html[s2..e2], "<td>b</td>");
        assert!(next_tag_block_ci(html, "td", e2).is_none());
    }

    #[test]
    fn attr_reads_quoted_and_bare_values() {
        assert_eq!(attr_ci(r#"<td rowspan="3">x</td>"#, "rowspan").as_deref(), Some("3"));
        assert_eq!(attr_ci("<td rowspan='2'>x</td>", "rowspan").as_deref(), Some("2"));
        assert_eq!(attr_ci("<td rowspan=4>x</td>", "rowspan").as_deref(), Some("4"));
        assert_eq!(attr_ci("<td ROWSPAN = 5 class=a>x</td>", "rowspan").as_deref(), Some("5"));
        assert_eq!(attr_ci("<td>x</td>", "rowspan"), None);
    }

    #[test]
    fn attr_ignores_lookalike_names() {
        // No whitespace boundary before the needle, so no match.
        assert_eq!(attr_ci(r#"<td data-rowspan="9">x</td>"#, "rowspan"), None);
    }

    #[test]
    fn strip_tags_keeps_inter_tag_whitespace() {
        let inner = s!("<p>bucket*</p>\n<p>object*</p>");
        assert_eq!(strip_tags(inner), "bucket* object*");
    }

    #[test]
    fn entities_decode_without_double_decoding() {
        assert_eq!(normalize_entities("a&nbsp;&amp;&nbsp;b"), "a & b");
        assert_eq!(normalize_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn normalize_ws_collapses_runs() {
        assert_eq!(normalize_ws("  a\t\tb \n c  "), "a b c");
    }
}
