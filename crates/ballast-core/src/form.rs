//! Weight-table form rendering, submission, and normalization
//!
//! The administrative surface works on whole tables: rendering produces a
//! deterministic row list, submission validates everything or changes
//! nothing, and normalization reassigns weights from a display order.

use serde::Serialize;

use crate::catalog::LabeledKey;
use crate::error::{BallastError, Result};
use crate::weight::{self, resolve, WeightTable};

/// One renderable row of a weight-table form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormRow {
    pub key: String,
    pub label: String,
    pub weight: i64,
    /// Rows are drag-reorderable on surfaces that support it
    pub draggable: bool,
}

/// Renderable description of a processor's weight-table form.
#[derive(Debug, Clone, Serialize)]
pub struct WeightTableForm {
    pub processor: String,
    pub default_weight: i64,
    pub rows: Vec<FormRow>,
}

/// A submitted row before validation. Weights arrive as strings, as posted
/// from a form.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub key: String,
    pub weight: String,
}

impl RawRow {
    pub fn new(key: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            weight: weight.into(),
        }
    }
}

/// Build the form description for one processor's weight table.
///
/// Every known key gets a row carrying its effective weight. Rows are
/// ordered ascending by weight; rows with equal weights keep the catalog's
/// enumeration order.
pub fn render_weight_table(
    processor: &str,
    keys: &[LabeledKey],
    table: &WeightTable,
    default_weight: i64,
) -> WeightTableForm {
    let mut rows: Vec<FormRow> = keys
        .iter()
        .map(|key| FormRow {
            key: key.id.clone(),
            label: key.label.clone(),
            weight: resolve(&key.id, table, default_weight),
            draggable: true,
        })
        .collect();
    // Stable sort keeps enumeration order within equal weights
    rows.sort_by_key(|row| row.weight);

    WeightTableForm {
        processor: processor.to_string(),
        default_weight,
        rows,
    }
}

/// Validate a full submission into a new weight table.
///
/// All-or-nothing: a malformed key, a key unknown to `known`, or a
/// non-integer weight rejects the whole submission, naming the offending
/// row; the caller's existing configuration stays untouched. Duplicate keys
/// keep the last value.
pub fn submit(context: &str, rows: &[RawRow], known: &[LabeledKey]) -> Result<WeightTable> {
    let mut table = WeightTable::new();
    for row in rows {
        if !weight::is_valid_key(&row.key) {
            return Err(BallastError::invalid_key(context, &row.key));
        }
        if !known.iter().any(|k| k.id == row.key) {
            return Err(BallastError::unknown_key(context, &row.key));
        }
        let parsed: i64 = row
            .weight
            .trim()
            .parse()
            .map_err(|_| BallastError::invalid_weight(&row.key, &row.weight))?;
        table.set(row.key.clone(), parsed);
    }
    Ok(table)
}

/// Reassign monotonic weights from a display order, the drag-to-reorder
/// analog.
///
/// Keys in `order` get weights `0, 1, 2, ...` in the order given; known
/// keys not listed continue the sequence in enumeration order.
pub fn normalize_order(
    context: &str,
    order: &[String],
    known: &[LabeledKey],
) -> Result<WeightTable> {
    let mut table = WeightTable::new();
    let mut next = 0i64;

    for key in order {
        if !known.iter().any(|k| k.id == *key) {
            return Err(BallastError::unknown_key(context, key));
        }
        if table.get(key).is_some() {
            return Err(BallastError::usage(format!("duplicate key in order: {key}")));
        }
        table.set(key.clone(), next);
        next += 1;
    }
    for key in known {
        if table.get(&key.id).is_none() {
            table.set(key.id.clone(), next);
            next += 1;
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known_keys() -> Vec<LabeledKey> {
        vec![
            LabeledKey::new("article", "Article"),
            LabeledKey::new("page", "Page"),
            LabeledKey::new("blog_post", "Blog post"),
        ]
    }

    #[test]
    fn rows_sort_ascending_by_weight() {
        let mut table = WeightTable::new();
        table.set("article", 5);
        table.set("page", 1);
        table.set("blog_post", 3);

        let form = render_weight_table("bundle", &known_keys(), &table, 0);
        let keys: Vec<&str> = form.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["page", "blog_post", "article"]);
    }

    #[test]
    fn equal_weights_keep_enumeration_order() {
        let table = WeightTable::new();
        let form = render_weight_table("bundle", &known_keys(), &table, 7);
        let keys: Vec<&str> = form.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["article", "page", "blog_post"]);
        assert!(form.rows.iter().all(|r| r.weight == 7));
        assert!(form.rows.iter().all(|r| r.draggable));
    }

    #[test]
    fn unset_keys_render_with_the_default() {
        let mut table = WeightTable::new();
        table.set("page", -2);

        let form = render_weight_table("bundle", &known_keys(), &table, 10);
        let page = form.rows.iter().find(|r| r.key == "page").unwrap();
        let article = form.rows.iter().find(|r| r.key == "article").unwrap();
        assert_eq!(page.weight, -2);
        assert_eq!(article.weight, 10);
    }

    #[test]
    fn submit_builds_a_table() {
        let rows = vec![RawRow::new("article", "5"), RawRow::new("page", " -3 ")];
        let table = submit("bundle", &rows, &known_keys()).unwrap();
        assert_eq!(table.get("article"), Some(5));
        assert_eq!(table.get("page"), Some(-3));
    }

    #[test]
    fn submit_keeps_last_duplicate() {
        let rows = vec![RawRow::new("article", "5"), RawRow::new("article", "9")];
        let table = submit("bundle", &rows, &known_keys()).unwrap();
        assert_eq!(table.get("article"), Some(9));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn submit_rejects_non_integer_weight() {
        let rows = vec![RawRow::new("article", "5"), RawRow::new("page", "abc")];
        let err = submit("bundle", &rows, &known_keys()).unwrap_err();
        match err {
            BallastError::InvalidWeight { key, .. } => assert_eq!(key, "page"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn submit_rejects_unknown_key() {
        let rows = vec![RawRow::new("landing", "5")];
        let err = submit("bundle", &rows, &known_keys()).unwrap_err();
        assert!(matches!(err, BallastError::UnknownKey { .. }));
    }

    #[test]
    fn submit_rejects_malformed_key() {
        let rows = vec![RawRow::new("Not A Key", "5")];
        let err = submit("bundle", &rows, &known_keys()).unwrap_err();
        assert!(matches!(err, BallastError::InvalidKey { .. }));
    }

    #[test]
    fn normalize_assigns_monotonic_weights() {
        let order = vec!["page".to_string(), "article".to_string()];
        let table = normalize_order("bundle", &order, &known_keys()).unwrap();
        assert_eq!(table.get("page"), Some(0));
        assert_eq!(table.get("article"), Some(1));
        // Unlisted keys continue the sequence in enumeration order
        assert_eq!(table.get("blog_post"), Some(2));
    }

    #[test]
    fn normalize_rejects_unknown_key() {
        let order = vec!["landing".to_string()];
        let err = normalize_order("bundle", &order, &known_keys()).unwrap_err();
        assert!(matches!(err, BallastError::UnknownKey { .. }));
    }

    #[test]
    fn normalize_rejects_duplicate_key() {
        let order = vec!["page".to_string(), "page".to_string()];
        let err = normalize_order("bundle", &order, &known_keys()).unwrap_err();
        assert!(matches!(err, BallastError::UsageError(_)));
    }

    #[test]
    fn normalized_order_renders_back_in_order() {
        let order = vec![
            "blog_post".to_string(),
            "page".to_string(),
            "article".to_string(),
        ];
        let table = normalize_order("bundle", &order, &known_keys()).unwrap();
        let form = render_weight_table("bundle", &known_keys(), &table, 0);
        let keys: Vec<&str> = form.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["blog_post", "page", "article"]);
    }
}
