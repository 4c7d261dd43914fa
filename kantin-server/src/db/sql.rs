//! `MenuQuery` → PostgreSQL against the `v_menu_stats` view

use chrono::{DateTime, Utc};
use shared::models::KANTIN_STATUS_ACTIVE;
use sqlx::Postgres;
use sqlx::query::QueryAs;

use crate::catalog::{CanteenFilter, CategoryFilter, MenuQuery, SortKey};

type PgArgs<'a> = <Postgres as sqlx::Database>::Arguments<'a>;

const AVG_RATING: &str = "COALESCE(m.avg_rating, 0)";
const TOTAL_RATINGS: &str = "COALESCE(m.total_ratings, 0)";
const TOTAL_SOLD: &str = "COALESCE(m.total_sold, 0)";

const MENU_COLUMNS: &str = "m.id::int8 AS id, m.kantin_id::int8 AS kantin_id, m.nama_menu, m.deskripsi, \
     COALESCE(m.kategori_menu, '{}')::text[] AS kategori_menu, m.harga::int8 AS harga, \
     COALESCE(m.tersedia, FALSE) AS tersedia, m.foto_menu, \
     COALESCE(m.avg_rating, 0)::float8 AS avg_rating, \
     COALESCE(m.total_ratings, 0)::int8 AS total_ratings, \
     COALESCE(m.total_sold, 0)::int8 AS total_sold, m.created_at";

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
}

/// Escape `%`, `_` and `\` so user text matches literally inside ILIKE
pub fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Rendered menu query: SQL text plus positional bindings
#[derive(Debug, Clone, Default)]
pub struct MenuSql {
    conditions: Vec<String>,
    bindings: Vec<SqlValue>,
    order: Vec<String>,
}

impl MenuSql {
    pub fn from_query(query: &MenuQuery) -> Self {
        let mut sql = Self::default();

        if let Some(text) = &query.text {
            let p = sql.bind(SqlValue::Text(like_pattern(text)));
            sql.conditions
                .push(format!("(m.nama_menu ILIKE {p} OR m.deskripsi ILIKE {p})"));
        }
        match &query.canteen {
            Some(CanteenFilter::Id(id)) => {
                let p = sql.bind(SqlValue::Integer(*id));
                sql.conditions.push(format!("m.kantin_id = {p}"));
            }
            Some(CanteenFilter::Name(name)) => {
                let p = sql.bind(SqlValue::Text(like_pattern(name)));
                sql.conditions.push(format!(
                    "m.kantin_id IN (SELECT k.id FROM kantin k WHERE k.nama_kantin ILIKE {p})"
                ));
            }
            None => {}
        }
        if let Some(category) = query.category {
            let p = sql.bind(SqlValue::Text(category.label().to_string()));
            let contains = format!("COALESCE(m.kategori_menu, '{{}}') @> ARRAY[{p}]::text[]");
            sql.conditions.push(match category {
                CategoryFilter::Contains(_) => contains,
                CategoryFilter::Excludes(_) => format!("NOT ({contains})"),
            });
        }
        if let Some(max) = query.max_price {
            let p = sql.bind(SqlValue::Float(max));
            sql.conditions.push(format!("m.harga <= {p}"));
        }
        if let Some(min) = query.min_rating {
            let p = sql.bind(SqlValue::Float(min));
            sql.conditions.push(format!("{AVG_RATING} >= {p}"));
        }
        if let Some(min) = query.min_reviews {
            let p = sql.bind(SqlValue::Integer(min));
            sql.conditions.push(format!("{TOTAL_RATINGS} >= {p}"));
        }
        if query.rated_only {
            sql.conditions.push(format!("{AVG_RATING} > 0"));
        }
        if query.sold_only {
            sql.conditions.push(format!("{TOTAL_SOLD} > 0"));
        }
        if query.only_available {
            sql.conditions.push("m.tersedia = TRUE".to_string());
        }
        if query.active_canteens_only {
            let p = sql.bind(SqlValue::Text(KANTIN_STATUS_ACTIVE.to_string()));
            sql.conditions.push(format!(
                "m.kantin_id IN (SELECT k.id FROM kantin k WHERE k.status = {p})"
            ));
        }
        if let Some(since) = query.created_since {
            let p = sql.bind(SqlValue::Timestamp(since));
            sql.conditions.push(format!("m.created_at >= {p}"));
        }

        sql.order = query.order.iter().map(|key| order_term(*key)).collect();
        sql.order.push("m.id ASC".to_string());

        // LIMIT is always the last placeholder
        sql.bind(SqlValue::Integer(query.limit));
        sql
    }

    /// Push a binding and return its `$n` placeholder
    fn bind(&mut self, value: SqlValue) -> String {
        self.bindings.push(value);
        format!("${}", self.bindings.len())
    }

    /// Build WHERE clause (empty if no conditions)
    pub fn build_where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn sql(&self) -> String {
        format!(
            "SELECT {MENU_COLUMNS} FROM v_menu_stats m{} ORDER BY {} LIMIT ${}",
            self.build_where_clause(),
            self.order.join(", "),
            self.bindings.len()
        )
    }

    pub fn bindings(&self) -> &[SqlValue] {
        &self.bindings
    }

    /// Apply bindings to a SQLx query_as
    pub fn apply_bindings<'a, 'b, O>(
        &'b self,
        mut query: QueryAs<'a, Postgres, O, PgArgs<'a>>,
    ) -> QueryAs<'a, Postgres, O, PgArgs<'a>>
    where
        'b: 'a,
    {
        for binding in &self.bindings {
            query = match binding {
                SqlValue::Text(s) => query.bind(s),
                SqlValue::Integer(i) => query.bind(*i),
                SqlValue::Float(f) => query.bind(*f),
                SqlValue::Timestamp(t) => query.bind(*t),
            };
        }
        query
    }
}

fn order_term(key: SortKey) -> String {
    match key {
        SortKey::RatingDesc => format!("{AVG_RATING} DESC"),
        SortKey::ReviewsDesc => format!("{TOTAL_RATINGS} DESC"),
        SortKey::PriceAsc => "m.harga ASC".to_string(),
        SortKey::PriceDesc => "m.harga DESC".to_string(),
        SortKey::BestSellerDesc => format!("{TOTAL_SOLD} DESC"),
        SortKey::NewestFirst => "m.created_at DESC".to_string(),
    }
}
