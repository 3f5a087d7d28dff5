//! Export results merged into existing config documents.

use super::test_utils::snapshot_from;
use confex::document::XmlElement;
use confex::{ConfigDocument, ScopeQueryEngine, ScopeSet};
use serde_json::json;
use tempfile::TempDir;

const EXISTING: &str = r#"<?xml version="1.0"?>
<config xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="urn:magento:module:Magento_Store:etc/config.xsd">
    <!-- maintained by hand -->
    <default>
        <general>
            <locale>
                <code>de_DE</code>
            </locale>
        </general>
        <sales_email>
            <order>
                <enabled>0</enabled>
            </order>
        </sales_email>
    </default>
</config>
"#;

#[test]
fn test_export_merges_into_existing_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.xml");
    std::fs::write(&path, EXISTING).unwrap();

    let snapshot = snapshot_from(json!({
        "default": {"general": {"locale": {"code": "en_US", "weight_unit": "kgs"}}},
        "stores": {"fr": {"general": {"locale": {"code": "fr_FR"}}}}
    }));
    let result = ScopeQueryEngine::new(&snapshot)
        .values("general/locale", &ScopeSet::all())
        .unwrap();

    let mut document = ConfigDocument::read_existing(&path).unwrap();
    assert_eq!(document.apply(&result).unwrap(), 3);
    document.write_back(&path).unwrap();

    let reread = ConfigDocument::read_existing(&path).unwrap();
    let root = reread.root();
    assert_eq!(root.attributes.len(), 2);

    let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["default", "stores"]);

    let text = |path: &[&str]| root.descendant(path).and_then(XmlElement::text).map(str::to_string);
    assert_eq!(text(&["default", "general", "locale", "code"]).as_deref(), Some("en_US"));
    assert_eq!(text(&["default", "general", "locale", "weight_unit"]).as_deref(), Some("kgs"));
    assert_eq!(text(&["default", "sales_email", "order", "enabled"]).as_deref(), Some("0"));
    assert_eq!(text(&["stores", "fr", "general", "locale", "code"]).as_deref(), Some("fr_FR"));

    let rendered = std::fs::read_to_string(&path).unwrap();
    assert!(!rendered.contains("maintained by hand"));
    assert!(rendered.ends_with("</config>\n"));
}

#[test]
fn test_empty_result_leaves_template_unchanged() {
    let snapshot = snapshot_from(json!({"default": {}}));
    let result = ScopeQueryEngine::new(&snapshot)
        .values("general", &ScopeSet::all())
        .unwrap();
    assert!(result.is_empty());

    let mut document = ConfigDocument::empty();
    assert_eq!(document.apply(&result).unwrap(), 0);
    assert_eq!(document, ConfigDocument::empty());
}

#[test]
fn test_malformed_document_is_an_error() {
    assert!(ConfigDocument::parse("<config><default></config>").is_err());
    assert!(ConfigDocument::parse("").is_err());
}
