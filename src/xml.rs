//! Owned XML element tree.
//!
//! The importer walks this tree and the exporter builds one before writing it
//! out in a single pass. Text is parsed with `roxmltree` and written with
//! `quick_xml`, so escaping lives in exactly one place on each side.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use roxmltree::{Document, Node, ParsingOptions};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<XmlNode>,
}

/// Output formatting for [`XmlElement::to_xml`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write elements without content as `<tag .../>`.
    pub self_closing: bool,
    /// Put a line break between a closing `>` and an immediately following `<`.
    pub newlines: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            self_closing: true,
            newlines: true,
        }
    }
}

impl XmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Direct element children, skipping text.
    pub fn child_elements(&self) -> impl DoubleEndedIterator<Item = &XmlElement> + '_ {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// All elements below this one in document order, excluding `self`.
    pub fn descendants(&self) -> impl Iterator<Item = &XmlElement> + '_ {
        let mut stack: Vec<&XmlElement> = self.child_elements().rev().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.child_elements().rev());
            Some(next)
        })
    }

    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.descendants().filter(move |e| e.has_tag(tag))
    }

    /// `self` if it carries `tag`, otherwise the first descendant that does.
    pub fn find_self_or_descendant(&self, tag: &str) -> Option<&XmlElement> {
        if self.has_tag(tag) {
            Some(self)
        } else {
            self.descendants().find(|e| e.has_tag(tag))
        }
    }

    /// Concatenated character data of this element and all its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }

    /// True when the element has no children or only empty text.
    pub fn has_empty_body(&self) -> bool {
        self.children
            .iter()
            .all(|c| matches!(c, XmlNode::Text(t) if t.is_empty()))
    }

    // ────────────────────────────────────────────────────────────────────────
    // Reading
    // ────────────────────────────────────────────────────────────────────────

    /// Parse XML text and return its root element.
    ///
    /// Eagle files start with `<!DOCTYPE eagle SYSTEM "eagle.dtd">`, so DTDs
    /// are accepted. Comments and processing instructions are dropped.
    pub fn parse(text: &str) -> Result<XmlElement> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, options).context("Failed to parse XML")?;
        Ok(Self::from_node(doc.root_element()))
    }

    /// Copy a `roxmltree` element into an owned tree.
    pub fn from_node(node: Node<'_, '_>) -> XmlElement {
        let mut element = XmlElement::new(node.tag_name().name());
        for attr in node.attributes() {
            element
                .attributes
                .insert(attr.name().to_string(), attr.value().to_string());
        }
        for child in node.children() {
            if child.is_element() {
                element.push(Self::from_node(child));
            } else if child.is_text() {
                element
                    .children
                    .push(XmlNode::Text(child.text().unwrap_or("").to_string()));
            }
        }
        element
    }

    // ────────────────────────────────────────────────────────────────────────
    // Writing
    // ────────────────────────────────────────────────────────────────────────

    /// Serialize the tree. Attribute values and text are escaped.
    pub fn to_xml(&self, options: WriteOptions) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_into(&mut writer, options)?;
        String::from_utf8(writer.into_inner()).context("Serialized XML is not UTF-8")
    }

    fn write_into<W: Write>(&self, writer: &mut Writer<W>, options: WriteOptions) -> Result<()> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (name, value) in &self.attributes {
            let value = escape_attribute(value);
            start.push_attribute((name.as_bytes(), value.as_bytes()));
        }
        if options.self_closing && self.has_empty_body() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        writer.write_event(Event::Start(start))?;

        // Tracks whether the last thing written ended in '>'.
        let mut after_tag = true;
        // Empty text must stay empty, so no break before the closing tag.
        let mut only_empty_text = !self.children.is_empty();
        for child in &self.children {
            match child {
                XmlNode::Element(e) => {
                    if after_tag && options.newlines {
                        write_newline(writer)?;
                    }
                    e.write_into(writer, options)?;
                    after_tag = true;
                    only_empty_text = false;
                }
                XmlNode::Text(t) if t.is_empty() => {}
                XmlNode::Text(t) => {
                    let text = escape_text(t);
                    writer.write_event(Event::Text(BytesText::from_escaped(text.as_str())))?;
                    after_tag = false;
                    only_empty_text = false;
                }
            }
        }
        if after_tag && options.newlines && !only_empty_text {
            write_newline(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.tag.as_str())))?;
        Ok(())
    }
}

/// Escape markup characters plus `\r`, which parsers fold into `\n`.
fn escape_text(text: &str) -> String {
    escape(text).replace('\r', "&#13;")
}

/// Escape markup characters plus whitespace, which parsers normalize to
/// spaces inside attribute values.
fn escape_attribute(value: &str) -> String {
    escape(value)
        .replace('\t', "&#9;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

fn write_newline<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
    Ok(())
}
