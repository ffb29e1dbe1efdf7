//! Row-by-row decoding of fetched collections.
//!
//! One malformed record must not hide the others, so rows are decoded individually and the
//! ones that do not fit are dropped with a warning.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Decodes every row of `collection` that fits `T`, skipping the rest.
pub fn decode_rows<T: DeserializeOwned>(collection: &str, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let id = row.get("id").map(Value::to_string);
            serde_json::from_value(row)
                .map_err(|e| {
                    warn!(
                        collection,
                        index,
                        id = id.as_deref().unwrap_or("-"),
                        error = %e,
                        "skipping undecodable record"
                    );
                })
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{Brand, Proposition};

    #[test]
    fn keeps_valid_rows_in_order() {
        let rows = vec![
            json!({"id": 1, "nom": "Acme Corp"}),
            json!({"id": 2}),
            json!("not a record"),
            json!({"id": 3, "nom": "Globex"}),
        ];

        let brands: Vec<Brand> = decode_rows("marques", rows);

        let names: Vec<&str> = brands.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Acme Corp", "Globex"]);
    }

    #[test]
    fn unknown_status_drops_only_that_row() {
        let rows = vec![
            json!({"id": 20, "marque_nom": "Acme", "statut": "archive"}),
            json!({"id": 21, "marque_nom": "Acme", "statut": null}),
        ];

        let propositions: Vec<Proposition> = decode_rows("propositions", rows);

        assert_eq!(propositions.len(), 1);
        assert!(propositions[0].is_pending());
    }

    #[test]
    fn empty_collection() {
        let brands: Vec<Brand> = decode_rows("marques", Vec::new());
        assert!(brands.is_empty());
    }
}
