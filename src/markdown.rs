//! Restricted markdown for task descriptions: `**bold**`, `*italic*`,
//! `[label](url)` and flat `- ` / `* ` bullet lists. Everything else is a
//! paragraph. No nesting, no headings, no code blocks; a blank line
//! closes an open list.

/// Renders a description to HTML. Input text is entity-escaped before
/// any markup is applied, so raw HTML in a description stays inert.
pub fn render(text: &str) -> String {
    let mut out = String::new();
    let mut in_list = false;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            if in_list {
                out.push_str("</ul>");
                in_list = false;
            }
            continue;
        }

        if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            if !in_list {
                out.push_str("<ul>");
                in_list = true;
            }
            out.push_str("<li>");
            out.push_str(&render_inline(item));
            out.push_str("</li>");
        } else {
            if in_list {
                out.push_str("</ul>");
                in_list = false;
            }
            out.push_str("<p>");
            out.push_str(&render_inline(line));
            out.push_str("</p>");
        }
    }

    if in_list {
        out.push_str("</ul>");
    }

    out
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_inline(text: &str) -> String {
    let escaped = escape(text);
    let bolded = replace_delimited(&escaped, "**", "<strong>", "</strong>");
    let emphasized = replace_delimited(&bolded, "*", "<em>", "</em>");
    replace_links(&emphasized)
}

/// Non-greedy pair replacement: `**a** and **b**` becomes two separate
/// strong spans. An unmatched opener is left as literal text.
fn replace_delimited(text: &str, delim: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(delim) {
        let after_open = &rest[start + delim.len()..];
        match after_open.find(delim) {
            Some(end) => {
                out.push_str(&rest[..start]);
                out.push_str(open);
                out.push_str(&after_open[..end]);
                out.push_str(close);
                rest = &after_open[end + delim.len()..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// `[label](url)` to an anchor that opens in a new tab.
fn replace_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('[') {
        let candidate = &rest[start..];
        let parsed = candidate.find(']').and_then(|close_bracket| {
            let after = &candidate[close_bracket + 1..];
            if !after.starts_with('(') {
                return None;
            }
            let close_paren = after.find(')')?;
            let label = &candidate[1..close_bracket];
            let url = &after[1..close_paren];
            Some((label, url, start + close_bracket + 1 + close_paren + 1))
        });

        match parsed {
            Some((label, url, consumed)) => {
                out.push_str(&rest[..start]);
                out.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                    url, label
                ));
                rest = &rest[consumed..];
            }
            None => {
                // literal '[': emit it and keep scanning after it
                out.push_str(&rest[..start + 1]);
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}
