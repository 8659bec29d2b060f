//! SVG serialization back to XML.

use crate::ast::*;

/// Serialize a Document to an SVG string.
///
/// Elements whose attributes were never touched are written from their
/// original start tag, so an unmodified document comes out byte-identical.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    let mut stack: Vec<Step> = doc.children.iter().rev().map(|&id| Step::Open(id)).collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => match &doc.node(id).kind {
                NodeKind::Element(elem) => {
                    open_element(&mut out, elem);
                    if !elem.self_closing {
                        stack.push(Step::Close(id));
                        stack.extend(elem.children.iter().rev().map(|&child| Step::Open(child)));
                    }
                }
                kind => serialize_leaf(&mut out, kind),
            },
            Step::Close(id) => {
                if let Some(elem) = doc.element(id) {
                    out.push_str("</");
                    out.push_str(&elem.name.full_name());
                    out.push('>');
                }
            }
        }
    }
    out
}

/// Pending work for the serializer.
enum Step {
    Open(NodeId),
    Close(NodeId),
}

fn serialize_leaf(out: &mut String, kind: &NodeKind) {
    match kind {
        NodeKind::Element(_) => {}
        NodeKind::Text(text) => out.push_str(text),
        NodeKind::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        NodeKind::CData(data) => {
            out.push_str("<![CDATA[");
            out.push_str(data);
            out.push_str("]]>");
        }
        NodeKind::ProcessingInstruction(content) | NodeKind::Declaration(content) => {
            out.push_str("<?");
            out.push_str(content);
            out.push_str("?>");
        }
        NodeKind::DocType(dt) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(dt.trim_start());
            out.push('>');
        }
    }
}

fn open_element(out: &mut String, elem: &Element) {
    out.push('<');
    match &elem.source {
        Some(source) => out.push_str(source),
        None => push_start_tag(out, elem),
    }
    out.push_str(if elem.self_closing { "/>" } else { ">" });
}

fn push_start_tag(out: &mut String, elem: &Element) {
    out.push_str(&elem.name.full_name());
    for attr in &elem.attributes {
        // Values are stored escaped; a literal `"` only survives from a single-quoted original.
        let quote = if attr.raw_value.contains('"') { '\'' } else { '"' };
        out.push(' ');
        out.push_str(&attr.name.full_name());
        out.push('=');
        out.push(quote);
        out.push_str(&attr.raw_value);
        out.push(quote);
    }
}
