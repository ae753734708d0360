//! HTML serialization of a document subtree.

use super::{Document, NodeId};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

impl Document {
    /// Serialize `node` and its subtree to HTML.
    ///
    /// Unknown nodes serialize to an empty string.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.get(node) else {
            return;
        };

        out.push('<');
        out.push_str(&element.tag);
        if !element.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape(&element.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &element.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&element.tag.as_str()) {
            return;
        }

        if let Some(text) = &element.text {
            out.push_str(&escape(text));
        }
        for &child in &element.children {
            self.write_html(child, out);
        }

        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
