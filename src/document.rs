//! Config document store
//!
//! The export target is an XML `config` document (`var/config/config.xml` by
//! default). Export results are merged into the existing document: every key
//! of the result tree names an element, found among the existing children or
//! appended, and leaves set the element's text. Elements the export does not
//! touch keep their content, attributes and order.

use crate::error::ExportError;
use crate::tree::ResultTree;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Root element of a config document.
pub const ROOT_ELEMENT: &str = "config";

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "urn:magento:module:Magento_Store:etc/config.xsd";
const INDENT_SIZE: usize = 4;

/// One element of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Follow a chain of child names.
    pub fn descendant(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |element, name| element.child(name))
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn child_or_insert(&mut self, name: &str) -> &mut XmlElement {
        let index = match self.children.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.children.push(XmlElement::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }
}

/// An in-memory config document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    root: XmlElement,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigDocument {
    /// The empty template used when no document exists yet.
    pub fn empty() -> Self {
        let mut root = XmlElement::new(ROOT_ELEMENT);
        root.attributes = vec![
            ("xmlns:xsi".to_string(), XSI_NAMESPACE.to_string()),
            (
                "xsi:noNamespaceSchemaLocation".to_string(),
                SCHEMA_LOCATION.to_string(),
            ),
        ];
        Self { root }
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Read the document at `path`, or the empty template if there is none.
    pub fn read_existing(path: &Path) -> Result<Self, ExportError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config document not found, starting from template");
            return Ok(Self::empty());
        }
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a document from XML text. Comments and processing instructions are dropped.
    ///
    /// Leaf text is kept byte-for-byte; only whitespace between child elements is discarded.
    pub fn parse(xml: &str) -> Result<Self, ExportError> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| ExportError::Document("unbalanced closing tag".to_string()))?;
                    drop_layout_text(&mut element);
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(xml_error)?;
                    push_text(&mut stack, &text);
                }
                Event::CData(data) => {
                    push_text(&mut stack, &String::from_utf8_lossy(&data));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(ExportError::Document("unclosed element at end of document".to_string()));
        }
        root.map(|mut root| {
            if root.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
                root.text = None;
            }
            Self { root }
        })
        .ok_or_else(|| ExportError::Document("document has no root element".to_string()))
    }

    /// Merge an export result into the document; returns the number of values written.
    pub fn apply(&mut self, result: &ResultTree) -> Result<usize, ExportError> {
        let value = serde_json::to_value(result)
            .map_err(|e| ExportError::Document(format!("Failed to serialize result: {}", e)))?;
        let Value::Object(scopes) = value else {
            return Ok(0);
        };
        Ok(scopes
            .iter()
            .map(|(key, value)| apply_value(&mut self.root, key, value))
            .sum())
    }

    /// Pretty-print with an XML declaration and 4-space indentation.
    pub fn render(&self) -> Result<String, ExportError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
            .map_err(xml_error)?;
        write_element(&mut writer, &self.root)?;

        let mut rendered = String::from_utf8(writer.into_inner())
            .map_err(|e| ExportError::Document(format!("Rendered document is not UTF-8: {}", e)))?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Write the rendered document, creating parent directories as needed.
    pub fn write_back(&self, path: &Path) -> Result<(), ExportError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.render()?)?;
        debug!(path = %path.display(), "Config document written");
        Ok(())
    }
}

fn apply_value(parent: &mut XmlElement, key: &str, value: &Value) -> usize {
    let element = parent.child_or_insert(key);
    match value {
        Value::Object(children) => {
            element.text = None;
            children
                .iter()
                .map(|(key, value)| apply_value(element, key, value))
                .sum()
        }
        leaf => {
            element.children.clear();
            element.text = Some(leaf_text(leaf));
            1
        }
    }
}

/// String form of a leaf value as written into the document.
pub fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, ExportError> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(xml_error)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), ExportError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(ExportError::Document(
                "document has more than one root element".to_string(),
            ))
        }
    }
    Ok(())
}

/// Whitespace-only text beside child elements is indentation, not a value.
fn drop_layout_text(element: &mut XmlElement) {
    if element.children.is_empty() {
        return;
    }
    if element.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
        element.text = None;
    }
}

fn push_text(stack: &mut [XmlElement], text: &str) {
    if let Some(current) = stack.last_mut() {
        current.text.get_or_insert_with(String::new).push_str(text);
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), ExportError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    let text = element.text.as_deref().filter(|t| !t.is_empty());
    if element.children.is_empty() && text.is_none() {
        writer.write_event(Event::Empty(start)).map_err(xml_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    if let Some(text) = text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(xml_error)?;
    Ok(())
}

fn xml_error<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::Document(err.to_string())
}
