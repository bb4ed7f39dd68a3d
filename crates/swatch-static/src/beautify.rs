//! HTML pretty-printing for rendered component samples.

use std::sync::LazyLock;

use regex::Regex;

const INDENT: &str = "    ";

/// Elements kept in the flow of the surrounding line.
const INLINE: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "button", "cite", "code", "data", "dfn", "em", "i",
    "img", "input", "kbd", "label", "mark", "q", "s", "samp", "small", "span", "strong", "sub",
    "sup", "time", "u", "var", "wbr",
];

/// Elements that never have content.
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose content is emitted untouched.
const RAW: &[&str] = &["pre", "script", "style", "textarea"];

static TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(/)?([a-zA-Z][a-zA-Z0-9:-]*)").unwrap());

/// Pretty-print an HTML fragment.
///
/// Block elements go on their own lines, indented by nesting depth. Inline
/// elements and text share a line with whitespace collapsed.
pub fn beautify(html: &str) -> String {
    let mut printer = Printer::default();
    let mut rest = html;

    while !rest.is_empty() {
        if rest.starts_with("<!--") {
            let end = rest.find("-->").map(|i| i + 3).unwrap_or(rest.len());
            printer.line(&rest[..end]);
            rest = &rest[end..];
        } else if rest.starts_with('<') {
            let end = if TAG_NAME.is_match(rest) {
                tag_end(rest)
            } else {
                rest.find('>').map(|i| i + 1).unwrap_or(rest.len())
            };
            let tag = &rest[..end];
            rest = &rest[end..];

            if tag.starts_with("<!") {
                printer.line(tag);
                continue;
            }

            let Some(caps) = TAG_NAME.captures(tag) else {
                // A stray `<` in text
                printer.text(&collapse(tag));
                continue;
            };

            let closing = caps.get(1).is_some();
            let name = caps[2].to_ascii_lowercase();
            let name = name.as_str();

            if INLINE.contains(&name) {
                printer.text(tag);
            } else if closing {
                printer.close(tag);
            } else if RAW.contains(&name) {
                let end = raw_end(rest, name);
                printer.line(&format!("{}{}", tag, &rest[..end]));
                rest = &rest[end..];
            } else if VOID.contains(&name) || tag.ends_with("/>") {
                printer.line(tag);
            } else {
                printer.open(tag);
            }
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            printer.text(&collapse(&rest[..end]));
            rest = &rest[end..];
        }
    }

    printer.finish()
}

/// Byte offset just past the `>` ending the tag at the start of `rest`.
///
/// Quoted attribute values may contain `>`.
fn tag_end(rest: &str) -> usize {
    let mut quote = None;

    for (i, c) in rest.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => return i + 1,
            _ => {}
        }
    }

    rest.len()
}

/// Byte offset just past the closing tag of a raw element.
fn raw_end(rest: &str, name: &str) -> usize {
    let close = format!("</{}", name);
    let Some(start) = rest.to_ascii_lowercase().find(&close) else {
        return rest.len();
    };

    rest[start..]
        .find('>')
        .map(|i| start + i + 1)
        .unwrap_or(rest.len())
}

/// Collapse whitespace runs into single spaces.
fn collapse(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }

    out
}

#[derive(Default)]
struct Printer {
    lines: Vec<String>,
    current: String,
    depth: usize,
}

impl Printer {
    fn indent(&self) -> String {
        INDENT.repeat(self.depth)
    }

    /// Append inline content to the current line.
    fn text(&mut self, text: &str) {
        if self.current.is_empty() {
            let text = text.trim_start();
            if text.is_empty() {
                return;
            }
            self.current = self.indent();
            self.current.push_str(text);
        } else {
            self.current.push_str(text);
        }
    }

    fn flush(&mut self) {
        let line = self.current.trim_end();
        if !line.trim_start().is_empty() {
            self.lines.push(line.to_string());
        }
        self.current.clear();
    }

    fn line(&mut self, content: &str) {
        self.flush();
        let line = format!("{}{}", self.indent(), content.trim());
        self.lines.push(line);
    }

    fn open(&mut self, tag: &str) {
        self.line(tag);
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.flush();
        self.depth = self.depth.saturating_sub(1);
        self.line(tag);
    }

    fn finish(mut self) -> String {
        self.flush();
        self.lines.join("\n")
    }
}
