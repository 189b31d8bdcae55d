//! Markup fragment tree and lenient parser
//!
//! The segmenter operates on a generic tree: elements with a tag name,
//! ordered children, and verbatim attributes, or text leaves. This module
//! turns a fragment string into that tree. The parser never fails —
//! malformed constructs degrade: a stray `<` becomes text, unclosed
//! elements close at end of input, unmatched close tags are dropped, and
//! comments/doctypes are skipped. Well-formedness validation is a
//! non-goal.

use memchr::memchr;
use std::fmt::Write;

/// A node in the input tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element with a tag name, verbatim attributes and ordered children
    Element {
        /// Lowercased tag name
        tag: String,
        /// Attributes in source order, values entity-decoded
        attrs: Vec<(String, String)>,
        /// Child nodes in document order
        children: Vec<Node>,
    },
    /// Text leaf, entity-decoded
    Text(String),
}

/// Elements that never take children
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Whether a tag name names a void element
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Parse a markup fragment into a tree
pub fn parse_fragment(input: &str) -> Vec<Node> {
    Parser::new(input).run()
}

struct OpenElement {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    stack: Vec<OpenElement>,
    top: Vec<Node>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            stack: Vec::new(),
            top: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Node> {
        while self.pos < self.input.len() {
            match memchr(b'<', &self.input.as_bytes()[self.pos..]) {
                Some(offset) => {
                    if offset > 0 {
                        let text = &self.input[self.pos..self.pos + offset];
                        self.push_text(text);
                        self.pos += offset;
                    }
                    self.consume_angle();
                }
                None => {
                    let text = &self.input[self.pos..];
                    self.push_text(text);
                    self.pos = self.input.len();
                }
            }
        }
        // Unclosed elements close at end of input
        while let Some(open) = self.stack.pop() {
            self.attach(Node::Element {
                tag: open.tag,
                attrs: open.attrs,
                children: open.children,
            });
        }
        self.top
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn push_text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let node = Node::Text(decode_entities(raw));
        match self.stack.last_mut() {
            Some(open) => open.children.push(node),
            None => self.top.push(node),
        }
    }

    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(open) => open.children.push(node),
            None => self.top.push(node),
        }
    }

    /// Consume whatever starts at the current `<`
    fn consume_angle(&mut self) {
        let rest = self.rest();
        if rest.starts_with("<!--") {
            self.pos += match rest.find("-->") {
                Some(end) => end + 3,
                None => rest.len(),
            };
        } else if rest.starts_with("<!") || rest.starts_with("<?") {
            self.pos += match rest.find('>') {
                Some(end) => end + 1,
                None => rest.len(),
            };
        } else if let Some(after) = rest.strip_prefix("</") {
            self.consume_close_tag(after);
        } else if rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            self.consume_open_tag();
        } else {
            // Stray angle bracket is plain text
            self.push_text("<");
            self.pos += 1;
        }
    }

    fn consume_close_tag(&mut self, after: &str) {
        let name_len = after
            .find(|c: char| !is_name_char(c))
            .unwrap_or(after.len());
        let name = after[..name_len].to_ascii_lowercase();
        let consumed = match after[name_len..].find('>') {
            Some(end) => 2 + name_len + end + 1,
            None => self.rest().len(),
        };
        self.pos += consumed;

        // Close up to the matching open element; drop the tag if nothing
        // on the stack matches.
        if let Some(depth) = self.stack.iter().rposition(|open| open.tag == name) {
            while self.stack.len() > depth {
                let Some(open) = self.stack.pop() else { break };
                self.attach(Node::Element {
                    tag: open.tag,
                    attrs: open.attrs,
                    children: open.children,
                });
            }
        }
    }

    fn consume_open_tag(&mut self) {
        let rest = self.rest();
        let after = &rest[1..];
        let name_len = after
            .find(|c: char| !is_name_char(c))
            .unwrap_or(after.len());
        let tag = after[..name_len].to_ascii_lowercase();

        let mut cursor = 1 + name_len;
        let attrs = parse_attributes(rest, &mut cursor);
        let self_closing = rest[..cursor].ends_with("/>");
        self.pos += cursor;

        if self_closing || is_void_tag(&tag) {
            self.attach(Node::Element {
                tag,
                attrs,
                children: Vec::new(),
            });
        } else {
            self.stack.push(OpenElement {
                tag,
                attrs,
                children: Vec::new(),
            });
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':'
}

/// Parse attributes from `rest[*cursor..]` up to and including the
/// closing `>`; advances the cursor past it.
fn parse_attributes(rest: &str, cursor: &mut usize) -> Vec<(String, String)> {
    let bytes = rest.as_bytes();
    let mut attrs = Vec::new();

    loop {
        while *cursor < bytes.len() && bytes[*cursor].is_ascii_whitespace() {
            *cursor += 1;
        }
        if *cursor >= bytes.len() {
            break;
        }
        match bytes[*cursor] {
            b'>' => {
                *cursor += 1;
                break;
            }
            b'/' if bytes.get(*cursor + 1) == Some(&b'>') => {
                *cursor += 2;
                break;
            }
            _ => {
                let name_start = *cursor;
                while *cursor < bytes.len()
                    && !bytes[*cursor].is_ascii_whitespace()
                    && !matches!(bytes[*cursor], b'=' | b'>' | b'/')
                {
                    *cursor += 1;
                }
                if *cursor == name_start {
                    // Lone '/' not followed by '>', skip it
                    *cursor += 1;
                    continue;
                }
                let name = rest[name_start..*cursor].to_ascii_lowercase();
                while *cursor < bytes.len() && bytes[*cursor].is_ascii_whitespace() {
                    *cursor += 1;
                }
                let value = if bytes.get(*cursor) == Some(&b'=') {
                    *cursor += 1;
                    while *cursor < bytes.len() && bytes[*cursor].is_ascii_whitespace() {
                        *cursor += 1;
                    }
                    parse_attribute_value(rest, cursor)
                } else {
                    String::new()
                };
                attrs.push((name, value));
            }
        }
    }
    attrs
}

fn parse_attribute_value(rest: &str, cursor: &mut usize) -> String {
    let bytes = rest.as_bytes();
    match bytes.get(*cursor) {
        Some(&quote @ (b'"' | b'\'')) => {
            *cursor += 1;
            let start = *cursor;
            while *cursor < bytes.len() && bytes[*cursor] != quote {
                *cursor += 1;
            }
            let value = decode_entities(&rest[start..*cursor]);
            if *cursor < bytes.len() {
                *cursor += 1;
            }
            value
        }
        _ => {
            let start = *cursor;
            while *cursor < bytes.len()
                && !bytes[*cursor].is_ascii_whitespace()
                && !matches!(bytes[*cursor], b'>' | b'/')
            {
                *cursor += 1;
            }
            decode_entities(&rest[start..*cursor])
        }
    }
}

/// Decode the common named entities plus numeric references; unknown
/// entities pass through verbatim.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        // Entity names are short; anything longer is plain text
        let semi = match rest.find(';') {
            Some(semi) if semi <= 12 => semi,
            _ => {
                out.push('&');
                rest = &rest[1..];
                continue;
            }
        };
        let entity = &rest[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{a0}'),
            _ => entity
                .strip_prefix('#')
                .and_then(|num| {
                    if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                        u32::from_str_radix(hex, 16).ok()
                    } else {
                        num.parse().ok()
                    }
                })
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escape text content for serialization
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for serialization in double quotes
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Write an attribute list in `name="value"` form
pub fn write_attrs(out: &mut String, attrs: &[(String, String)]) {
    for (name, value) in attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
    }
}
