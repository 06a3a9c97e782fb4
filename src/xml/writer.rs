use quick_xml::escape::{escape, partial_escape};

use crate::xml::node::{XmlElement, XmlNode};

// ============================================================================
// Document serialization
// ============================================================================

/// Serialize a document rooted at `root`.
///
/// Produces:
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuites>
///   <testsuite name="Core" tests="8" ...>...</testsuite>
/// </testsuites>
/// ```
/// No indentation is added; whitespace text nodes in the tree are written
/// verbatim, so layout is whatever the tree carries.
pub fn write_document(root: &XmlElement) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_element(root, &mut out);
    out.push('\n');
    out
}

/// Serialize a single element subtree without a declaration.
pub fn write_element(element: &XmlElement, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push_str(&format!(" {}=\"{}\"", key, escape(value.as_str())));
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        write_node(child, out);
    }
    out.push_str(&format!("</{}>", element.name));
}

fn write_node(node: &XmlNode, out: &mut String) {
    match node {
        XmlNode::Element(el) => write_element(el, out),
        XmlNode::Text(text) => out.push_str(&partial_escape(text.as_str())),
        XmlNode::CData(data) => {
            // A literal "]]>" has to be split across two sections.
            out.push_str("<![CDATA[");
            out.push_str(&data.replace("]]>", "]]]]><![CDATA[>"));
            out.push_str("]]>");
        }
        XmlNode::Comment(comment) => out.push_str(&format!("<!--{}-->", comment)),
        XmlNode::ProcessingInstruction(pi) => out.push_str(&format!("<?{}?>", pi)),
    }
}
