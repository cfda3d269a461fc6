//! Codecs for the structured text payloads stored on entities.
//!
//! Tags, spec/constraint key-value maps, pricing inclusions, and runbook
//! checklist sections are persisted as JSON text columns. Writes go through
//! the typed DTOs so shape is enforced before anything reaches the store;
//! reads are lenient and fall back to an empty payload if a stored blob no
//! longer parses.

use std::collections::BTreeMap;

use tracing;

use crate::{model::runbook::RunbookSectionDto, server::error::Error};

pub fn encode_tags(tags: &[String]) -> Result<String, Error> {
    serde_json::to_string(tags).map_err(|e| Error::InternalError(format!("tag encode: {e}")))
}

pub fn decode_tags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str(raw) {
        Ok(tags) => tags,
        Err(e) => {
            tracing::debug!("discarding unparseable tag payload: {e}");
            Vec::new()
        }
    }
}

pub fn encode_kv(map: &BTreeMap<String, String>) -> Result<String, Error> {
    serde_json::to_string(map).map_err(|e| Error::InternalError(format!("kv encode: {e}")))
}

pub fn decode_kv(raw: Option<&str>) -> BTreeMap<String, String> {
    let Some(raw) = raw else {
        return BTreeMap::new();
    };

    match serde_json::from_str(raw) {
        Ok(map) => map,
        Err(e) => {
            tracing::debug!("discarding unparseable key/value payload: {e}");
            BTreeMap::new()
        }
    }
}

pub fn encode_sections(sections: &[RunbookSectionDto]) -> Result<String, Error> {
    serde_json::to_string(sections)
        .map_err(|e| Error::InternalError(format!("section encode: {e}")))
}

pub fn decode_sections(raw: Option<&str>) -> Vec<RunbookSectionDto> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str(raw) {
        Ok(sections) => sections,
        Err(e) => {
            tracing::debug!("discarding unparseable checklist payload: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect tags to round-trip through the JSON column encoding
    #[test]
    fn tags_round_trip() {
        let tags = vec!["launch".to_string(), "venue".to_string()];

        let encoded = encode_tags(&tags).unwrap();
        let decoded = decode_tags(Some(&encoded));

        assert_eq!(decoded, tags);
    }

    /// Expect malformed stored tags to decode as empty rather than fail reads
    #[test]
    fn malformed_tags_decode_empty() {
        assert!(decode_tags(Some("not json")).is_empty());
        assert!(decode_tags(None).is_empty());
    }

    /// Expect key/value payloads to preserve entries
    #[test]
    fn kv_round_trip() {
        let mut map = BTreeMap::new();
        map.insert("display".to_string(), "8 inch".to_string());
        map.insert("battery".to_string(), "5000mAh".to_string());

        let encoded = encode_kv(&map).unwrap();
        let decoded = decode_kv(Some(&encoded));

        assert_eq!(decoded, map);
    }

    /// Expect checklist sections to keep item order
    #[test]
    fn sections_round_trip() {
        let sections = vec![RunbookSectionDto {
            section: "Install".to_string(),
            items: vec!["Mount stand".to_string(), "Pair device".to_string()],
        }];

        let encoded = encode_sections(&sections).unwrap();
        let decoded = decode_sections(Some(&encoded));

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].section, "Install");
        assert_eq!(decoded[0].items, sections[0].items);
    }
}
