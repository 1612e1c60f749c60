//! Structural mapping between persisted records and representations
//!
//! Fields are matched by name through a `serde_json::Value`. Fields the
//! target does not know are dropped; fields it needs but the source lacks
//! fall back to the target's serde defaults.

use crate::core::error::{BookstoreError, BookstoreResult};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Map one object onto another type with the same field names
pub fn parse_object<S, D>(source: &S) -> BookstoreResult<D>
where
    S: Serialize,
    D: DeserializeOwned,
{
    let value = serde_json::to_value(source)
        .map_err(|e| BookstoreError::Internal(format!("mapping source failed: {}", e)))?;
    serde_json::from_value(value)
        .map_err(|e| BookstoreError::Internal(format!("mapping target failed: {}", e)))
}

/// Map a list element-wise, preserving order
pub fn parse_list_objects<S, D>(sources: &[S]) -> BookstoreResult<Vec<D>>
where
    S: Serialize,
    D: DeserializeOwned,
{
    sources.iter().map(parse_object).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize)]
    struct Source {
        id: Option<i64>,
        name: String,
        secret: String,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Target {
        id: Option<i64>,
        name: String,
        #[serde(default)]
        tags: Vec<String>,
    }

    #[test]
    fn test_parse_object_matches_by_name() {
        let source = Source {
            id: Some(3),
            name: "Ada".into(),
            secret: "x".into(),
        };
        let target: Target = parse_object(&source).unwrap();
        assert_eq!(
            target,
            Target {
                id: Some(3),
                name: "Ada".into(),
                tags: vec![]
            }
        );
    }

    #[test]
    fn test_parse_list_preserves_order() {
        let sources = vec![
            Source { id: Some(2), name: "b".into(), secret: String::new() },
            Source { id: Some(1), name: "a".into(), secret: String::new() },
        ];
        let targets: Vec<Target> = parse_list_objects(&sources).unwrap();
        let ids: Vec<_> = targets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![Some(2), Some(1)]);
    }
}
