//! XML value extraction
//!
//! Controller responses wrap every data point in a `<value>` element:
//!
//! ```xml
//! <eta xmlns="http://www.eta.co.at/rest/v1" version="1.0">
//!   <value uri="/user/var/..." strValue="22,5" unit="°C"
//!          decPlaces="0" scaleFactor="10" advTextOffset="0">225</value>
//! </eta>
//! ```
//!
//! Newer firmware namespace-qualifies the document, older firmware does
//! not; matching on the local tag name covers both generations.

use crate::config::ValueKind;
use crate::error::{EtaError, Result};
use roxmltree::{Document, Node};
use std::collections::HashMap;

/// Local name of the value-bearing element
pub const VALUE_TAG: &str = "value";

/// Fallback display value when a node carries no `strValue` attribute
pub const UNKNOWN_VALUE: &str = "unknown";

/// Attributes considered internal and stripped from readings
const EXCLUDED_ATTRIBUTES: [&str; 2] = ["uri", "unit"];

/// Raw value as found in the document, before unit conversion
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Numeric text body, parsed
    Number(f64),
    /// Textual status, taken from `strValue`
    Text(String),
}

/// Extracted (value, attributes) pair
#[derive(Debug, Clone)]
pub struct RawReading {
    pub value: RawValue,
    pub attributes: HashMap<String, String>,
}

/// Parse a response body into an XML document
pub fn parse_document(body: &str) -> Result<Document<'_>> {
    Document::parse(body).map_err(|e| EtaError::parse(format!("malformed XML response: {e}")))
}

/// Locate the first value-bearing node and extract a raw reading.
/// Returns `None` when the document carries no value element.
pub fn extract(doc: &Document<'_>, kind: ValueKind) -> Option<RawReading> {
    let node = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == VALUE_TAG)?;

    let attributes = node
        .attributes()
        .filter(|a| !EXCLUDED_ATTRIBUTES.contains(&a.name()))
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();

    let value = match kind {
        ValueKind::Status => RawValue::Text(str_value(&node)),
        ValueKind::Numeric => match numeric_text(&node) {
            Some(number) => RawValue::Number(number),
            // Bad numeric payloads degrade to the textual status instead
            // of failing the poll cycle.
            None => RawValue::Text(str_value(&node)),
        },
    };

    Some(RawReading { value, attributes })
}

fn str_value(node: &Node<'_, '_>) -> String {
    node.attribute("strValue").unwrap_or(UNKNOWN_VALUE).to_string()
}

fn numeric_text(node: &Node<'_, '_>) -> Option<f64> {
    node.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .and_then(|text| text.parse::<f64>().ok())
}
