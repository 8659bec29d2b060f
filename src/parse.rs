//! SVG parsing from XML.
//!
//! Character and entity references are never decoded here: text, comments and
//! attribute values are stored as written so they survive a round trip.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::ast::*;
use crate::error::FitError;

/// Parse an SVG string into a Document.
pub fn parse_svg(svg: &str) -> Result<Document, FitError> {
    let mut reader = Reader::from_str(svg);
    let mut doc = Document::new();
    let mut open: Vec<NodeId> = Vec::new();

    loop {
        let parent = open.last().copied();
        match reader.read_event()? {
            Event::Start(start) => {
                let mut element = parse_element_start(&start)?;
                element.self_closing = false;
                let id = doc.append(parent, NodeKind::Element(element));
                open.push(id);
            }
            Event::Empty(start) => {
                let element = parse_element_start(&start)?;
                doc.append(parent, NodeKind::Element(element));
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Text(text) => {
                doc.append(parent, NodeKind::Text(utf8(&text)?));
            }
            Event::Comment(comment) => {
                doc.append(parent, NodeKind::Comment(utf8(&comment)?));
            }
            Event::CData(cdata) => {
                doc.append(parent, NodeKind::CData(utf8(&cdata)?));
            }
            Event::PI(pi) => {
                doc.append(parent, NodeKind::ProcessingInstruction(utf8(&pi)?));
            }
            Event::Decl(decl) => {
                doc.append(parent, NodeKind::Declaration(utf8(&decl)?));
            }
            Event::DocType(dt) => {
                doc.append(parent, NodeKind::DocType(utf8(&dt)?));
            }
            Event::Eof => {
                if !open.is_empty() {
                    return Err(FitError::InvalidSvg("Unexpected end of file".into()));
                }
                break;
            }
        }
    }

    Ok(doc)
}

fn utf8(bytes: &[u8]) -> Result<String, FitError> {
    Ok(std::str::from_utf8(bytes)?.to_owned())
}

fn parse_element_start(start: &BytesStart) -> Result<Element, FitError> {
    let name_bytes = start.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?;

    let mut element = Element {
        name: QName::parse(name),
        attributes: Vec::new(),
        children: Vec::new(),
        source: Some(utf8(start)?),
        self_closing: true,
    };

    for attr in start.attributes() {
        let attr = attr.map_err(|e| FitError::InvalidSvg(format!("Invalid attribute: {}", e)))?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        element.attributes.push(Attribute {
            name: QName::parse(key),
            raw_value: value.to_owned(),
        });
    }

    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_svg() {
        let svg = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
    <path d="M0 0 L10 10"/>
</svg>"#;

        let doc = parse_svg(svg).unwrap();
        let root = doc.find_first("svg").unwrap();
        let root = doc.element(root).unwrap();
        assert_eq!(root.attr("width").as_deref(), Some("100"));
        assert!(matches!(
            doc.node(doc.children[0]).kind,
            NodeKind::Declaration(_)
        ));
    }

    #[test]
    fn test_parent_links() {
        let svg = r#"<svg><g transform="scale(2)"><path d="M0 0"/></g></svg>"#;
        let doc = parse_svg(svg).unwrap();
        let path = doc.find_all("path")[0];
        let g = doc.parent(path).unwrap();
        assert!(doc.element(g).unwrap().is("g"));
        let svg = doc.parent(g).unwrap();
        assert!(doc.element(svg).unwrap().is("svg"));
        assert_eq!(doc.parent(svg), None);
    }

    #[test]
    fn test_entities_stay_encoded() {
        let svg = r#"<svg><text title="a &amp; b">&lt;tag&gt; &#169;</text></svg>"#;
        let doc = parse_svg(svg).unwrap();
        let text = doc.find_first("text").unwrap();
        let elem = doc.element(text).unwrap();
        assert_eq!(elem.attributes[0].raw_value, "a &amp; b");
        assert_eq!(elem.attr("title").as_deref(), Some("a & b"));
        match &doc.node(elem.children[0]).kind {
            NodeKind::Text(t) => assert_eq!(t, "&lt;tag&gt; &#169;"),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_tags_fail() {
        assert!(parse_svg("<svg><g></svg>").is_err());
    }

    #[test]
    fn test_unclosed_root_fails() {
        assert!(parse_svg("<svg><g/>").is_err());
    }
}
