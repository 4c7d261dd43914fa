//! Order Models (`pesanan` / `detail_pesanan`)

use serde::{Deserialize, Serialize};

/// Status of an order whose line items count as sales
pub const ORDER_STATUS_COMPLETED: &str = "completed";

/// Order header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Pesanan {
    pub id: i64,
    pub status: String,
}

/// Order line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub pesanan_id: i64,
    pub menu_id: i64,
    pub jumlah: Option<i64>,
}
