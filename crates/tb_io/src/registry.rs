//! Prize category registry: wire shape, semantic validation, and conversion
//! into core entities.
//!
//! The wire format is strict (unknown fields rejected); checks the schema
//! cannot express happen in `normalize_registry`: token-valid unique ids,
//! known priority levels, non-empty display names.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use tb_core::entities::{PriorityLevel, PrizeCategory, PrizeRegistry};
use tb_core::tokens::CategoryId;

use crate::{IoError, IoResult};

fn default_enabled() -> bool {
    true
}

/// Top-level registry file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryFile {
    pub categories: Vec<CategoryEntry>,
}

/// One category as written in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub priority: String,
    pub weight_pct: u32,
    pub display_order: u32,
}

/// Read, parse, and normalize a registry file.
pub fn load_registry(path: &Path) -> IoResult<PrizeRegistry> {
    let text = fs::read_to_string(path)?;
    parse_registry(&text)
}

/// Parse and normalize registry JSON.
pub fn parse_registry(text: &str) -> IoResult<PrizeRegistry> {
    let wire: RegistryFile = serde_json::from_str(text)?;
    normalize_registry(&wire)
}

/// Wire -> core conversion with semantic checks.
pub fn normalize_registry(wire: &RegistryFile) -> IoResult<PrizeRegistry> {
    if wire.categories.is_empty() {
        return Err(IoError::Invalid("registry has no categories".into()));
    }

    let mut cats = Vec::with_capacity(wire.categories.len());
    for entry in &wire.categories {
        let id: CategoryId = entry
            .id
            .parse()
            .map_err(|e| IoError::Invalid(format!("category id {:?}: {e}", entry.id)))?;
        let priority: PriorityLevel = entry.priority.parse().map_err(|e| {
            IoError::Invalid(format!(
                "category {:?} priority {:?}: {e}",
                entry.id, entry.priority
            ))
        })?;
        if entry.name.trim().is_empty() {
            return Err(IoError::Invalid(format!(
                "category {:?} has an empty name",
                entry.id
            )));
        }
        cats.push(PrizeCategory {
            id,
            name: entry.name.clone(),
            description: entry.description.clone(),
            enabled: entry.enabled,
            priority,
            weight_pct: entry.weight_pct,
            display_order: entry.display_order,
        });
    }

    PrizeRegistry::new(cats).map_err(|e| IoError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "categories": [
            {"id": "full-house", "name": "Full House", "priority": "ultimate",
             "weight_pct": 60, "display_order": 2},
            {"id": "early-seven", "name": "Early Seven", "priority": "low",
             "weight_pct": 40, "display_order": 1, "enabled": false,
             "description": "First to seven."}
        ]
    }"#;

    #[test]
    fn parses_and_normalizes() {
        let reg = parse_registry(MINIMAL).unwrap();
        assert_eq!(reg.len(), 2);
        let fh: CategoryId = "full-house".parse().unwrap();
        let cat = reg.get(&fh).unwrap();
        assert!(cat.enabled); // defaulted
        assert_eq!(cat.description, ""); // defaulted
        assert_eq!(cat.priority, PriorityLevel::Ultimate);
        let es: CategoryId = "early-seven".parse().unwrap();
        assert!(!reg.get(&es).unwrap().enabled);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let text = r#"{"categories": [
            {"id": "a", "name": "A", "priority": "low", "weight_pct": 1, "display_order": 1},
            {"id": "a", "name": "A again", "priority": "low", "weight_pct": 1, "display_order": 2}
        ]}"#;
        let err = parse_registry(text).unwrap_err();
        assert!(err.to_string().contains("duplicate"), "{err}");
    }

    #[test]
    fn bad_priority_rejected_with_context() {
        let text = r#"{"categories": [
            {"id": "a", "name": "A", "priority": "urgent", "weight_pct": 1, "display_order": 1}
        ]}"#;
        let err = parse_registry(text).unwrap_err();
        assert!(err.to_string().contains("urgent"), "{err}");
    }

    #[test]
    fn unknown_fields_rejected() {
        let text = r#"{"categories": [
            {"id": "a", "name": "A", "priority": "low", "weight_pct": 1,
             "display_order": 1, "colour": "red"}
        ]}"#;
        assert!(parse_registry(text).is_err());
    }

    #[test]
    fn empty_registry_rejected() {
        assert!(parse_registry(r#"{"categories": []}"#).is_err());
    }

    #[test]
    fn bad_token_rejected() {
        let text = r#"{"categories": [
            {"id": "has space", "name": "A", "priority": "low", "weight_pct": 1, "display_order": 1}
        ]}"#;
        assert!(parse_registry(text).is_err());
    }
}
