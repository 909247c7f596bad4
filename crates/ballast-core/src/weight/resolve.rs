use super::WeightTable;

/// Resolve the effective sort-priority weight for a classification key.
///
/// An entry present in the table is honored even when its weight is exactly
/// `0`; only absence of the key falls back to `default_weight`. Resolution is
/// total and never fails.
pub fn resolve(key: &str, table: &WeightTable, default_weight: i64) -> i64 {
    table.get(key).unwrap_or(default_weight)
}
