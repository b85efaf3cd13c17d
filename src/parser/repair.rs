//! Undo the false nesting produced by parsers that ignore self-closing tags.
//!
//! Eagle packages are well-formed XML made mostly of self-closing elements.
//! A tree parser that does not honor `/>` on unknown tags (HTML parsers being
//! the usual offender) nests every following sibling inside the previous
//! element:
//!
//! ```text
//! <wire .../><pad .../><smd .../>   parsed as   <wire><pad><smd/></pad></wire>
//! ```
//!
//! [`repair_self_closing`] moves the element children of every affected tag
//! back out, directly after it. `polygon` is not affected: it is written with
//! an explicit closing tag and owns real `vertex` children.

use crate::xml::{XmlElement, XmlNode};

/// Tags that are always written self-closing, or only contain text.
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "wire",
    "text",
    "dimension",
    "circle",
    "rectangle",
    "frame",
    "hole",
    "pad",
    "smd",
    "vertex",
];

fn is_self_closing(tag: &str) -> bool {
    SELF_CLOSING_TAGS.contains(&tag)
}

/// Return a copy of `root` in which the element children of every
/// [`SELF_CLOSING_TAGS`] element have become its following siblings.
///
/// Text children stay where they are, so `<text>` keeps its content. A tree
/// that is already flat comes back unchanged.
pub fn repair_self_closing(root: XmlElement) -> XmlElement {
    let XmlElement {
        tag,
        attributes,
        children,
    } = root;
    XmlElement {
        tag,
        attributes,
        children: repair_children(children),
    }
}

fn repair_children(children: Vec<XmlNode>) -> Vec<XmlNode> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        match child {
            XmlNode::Element(element) if is_self_closing(&element.tag) => {
                let XmlElement {
                    tag,
                    attributes,
                    children,
                } = element;
                let (own, hoisted): (Vec<XmlNode>, Vec<XmlNode>) = children
                    .into_iter()
                    .partition(|c| matches!(c, XmlNode::Text(_)));
                out.push(XmlNode::Element(XmlElement {
                    tag,
                    attributes,
                    children: own,
                }));
                // Hoisted nodes may themselves carry falsely nested siblings.
                out.extend(repair_children(hoisted));
            }
            XmlNode::Element(element) => out.push(XmlNode::Element(repair_self_closing(element))),
            text => out.push(text),
        }
    }
    out
}
