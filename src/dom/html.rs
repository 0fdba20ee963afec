use crate::dom::document::{Document, NodeId, NodeKind};
use askama_escape::{escape, Html};

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Escapes `&`, `<`, `>`, `"` and `'` for text and double-quoted attribute values.
pub fn escape_html(value: &str) -> String {
    escape(value, Html).to_string()
}

impl Document {
    /// Serializes `id` and its subtree (`outerHTML`).
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    /// The whole page, doctype included.
    pub fn document_html(&self) -> String {
        format!("<!DOCTYPE html>\n{}\n", self.to_html(self.root()))
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Ok(node) = self.node(id) else {
            return;
        };

        match &node.kind {
            NodeKind::Text(text) => out.push_str(&escape_html(text)),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }

                for &child in &node.children {
                    self.write_html(child, out);
                }

                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}
