//! Sales aggregation from order line items
//!
//! Every requested id gets an entry (default 0). Only lines belonging to
//! completed orders count. Ids that are not integers never match.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::Value;
use shared::models::OrderLine;

/// One requested menu id: its response key and, if numeric, its row id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedId {
    pub key: String,
    pub menu_id: Option<i64>,
}

impl RequestedId {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_i64().or_else(|| integral(n.as_f64()?)) {
                Some(id) => Self {
                    key: id.to_string(),
                    menu_id: Some(id),
                },
                None => Self {
                    key: n.to_string(),
                    menu_id: None,
                },
            },
            Value::String(s) => Self {
                key: s.clone(),
                menu_id: s.trim().parse().ok(),
            },
            other => Self {
                key: other.to_string(),
                menu_id: None,
            },
        }
    }
}

/// `10.0` is the same JSON number as `10`
fn integral(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

/// Deduplicated request, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesRequest {
    pub ids: Vec<RequestedId>,
}

impl SalesRequest {
    pub fn from_values(values: &[Value]) -> Self {
        let mut seen = HashSet::new();
        let ids = values
            .iter()
            .map(RequestedId::from_value)
            .filter(|id| seen.insert(id.key.clone()))
            .collect();
        Self { ids }
    }

    /// Distinct numeric ids to look up
    pub fn menu_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.ids.iter().filter_map(|id| id.menu_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Sum quantities of completed lines per requested id
pub fn aggregate(
    request: &SalesRequest,
    lines: &[OrderLine],
    completed: &HashSet<i64>,
) -> BTreeMap<String, i64> {
    let mut totals: HashMap<i64, i64> = HashMap::new();
    for line in lines.iter().filter(|l| completed.contains(&l.pesanan_id)) {
        let qty = line.jumlah.unwrap_or(0).max(0);
        *totals.entry(line.menu_id).or_insert(0) += qty;
    }

    request
        .ids
        .iter()
        .map(|id| {
            let count = id
                .menu_id
                .and_then(|menu_id| totals.get(&menu_id).copied())
                .unwrap_or(0);
            (id.key.clone(), count)
        })
        .collect()
}
