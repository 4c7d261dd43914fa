//! Store-agnostic menu query
//!
//! [`MenuQuery`] describes the filters, sort keys and limit of a listing
//! request. The PostgreSQL store renders it to SQL; the in-memory store
//! evaluates it with [`MenuQuery::matches`] and [`MenuQuery::compare`].

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use shared::models::MenuStat;

use super::category::CategoryFilter;

/// Hard upper bound on any listing
pub const MAX_LIMIT: i64 = 50;

/// Clamp a requested limit: absent or ≤ 0 falls back to the endpoint default
pub fn resolve_limit(requested: Option<i64>, default: i64) -> i64 {
    match requested {
        Some(n) if n > 0 => n.min(MAX_LIMIT),
        _ => default.min(MAX_LIMIT),
    }
}

/// Canteen selector; an id always wins over a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanteenFilter {
    Id(i64),
    /// Case-insensitive substring of `nama_kantin`
    Name(String),
}

impl CanteenFilter {
    pub fn from_params(id: Option<i64>, name: Option<&str>) -> Option<Self> {
        if let Some(id) = id {
            return Some(Self::Id(id));
        }
        name.map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| Self::Name(n.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    RatingDesc,
    ReviewsDesc,
    PriceAsc,
    PriceDesc,
    BestSellerDesc,
    NewestFirst,
}

impl SortKey {
    /// Parse a caller-facing sort token
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "rating_desc" => Some(Self::RatingDesc),
            "price_asc" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            "best_seller_desc" => Some(Self::BestSellerDesc),
            _ => None,
        }
    }

    /// Sort keys for an optional token, falling back to the endpoint default
    pub fn resolve(token: Option<&str>, default: &[SortKey]) -> Vec<SortKey> {
        match token.and_then(Self::parse) {
            Some(key) => vec![key],
            None => default.to_vec(),
        }
    }

    fn compare(&self, a: &MenuStat, b: &MenuStat) -> Ordering {
        match self {
            Self::RatingDesc => b.avg_rating.total_cmp(&a.avg_rating),
            Self::ReviewsDesc => b.total_ratings.cmp(&a.total_ratings),
            Self::PriceAsc => a.harga.cmp(&b.harga),
            Self::PriceDesc => b.harga.cmp(&a.harga),
            Self::BestSellerDesc => b.total_sold.cmp(&a.total_sold),
            Self::NewestFirst => b.created_at.cmp(&a.created_at),
        }
    }
}

/// Filters, ordering and limit of one menu listing
#[derive(Debug, Clone, PartialEq)]
pub struct MenuQuery {
    pub text: Option<String>,
    pub canteen: Option<CanteenFilter>,
    pub category: Option<CategoryFilter>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub min_reviews: Option<i64>,
    /// avg_rating > 0
    pub rated_only: bool,
    /// total_sold > 0
    pub sold_only: bool,
    pub only_available: bool,
    /// Owning canteen has status "active"
    pub active_canteens_only: bool,
    pub created_since: Option<DateTime<Utc>>,
    pub order: Vec<SortKey>,
    pub limit: i64,
}

impl MenuQuery {
    pub fn new(limit: i64) -> Self {
        Self {
            text: None,
            canteen: None,
            category: None,
            max_price: None,
            min_rating: None,
            min_reviews: None,
            rated_only: false,
            sold_only: false,
            only_available: true,
            active_canteens_only: false,
            created_since: None,
            order: Vec::new(),
            limit: limit.clamp(0, MAX_LIMIT),
        }
    }

    pub fn text(mut self, text: Option<&str>) -> Self {
        self.text = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    pub fn canteen(mut self, canteen: Option<CanteenFilter>) -> Self {
        self.canteen = canteen;
        self
    }

    pub fn category(mut self, category: Option<CategoryFilter>) -> Self {
        self.category = category;
        self
    }

    pub fn max_price(mut self, max_price: Option<f64>) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn min_rating(mut self, min_rating: Option<f64>) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn min_reviews(mut self, min_reviews: Option<i64>) -> Self {
        self.min_reviews = min_reviews;
        self
    }

    pub fn rated_only(mut self) -> Self {
        self.rated_only = true;
        self
    }

    pub fn sold_only(mut self) -> Self {
        self.sold_only = true;
        self
    }

    pub fn only_available(mut self, only_available: bool) -> Self {
        self.only_available = only_available;
        self
    }

    pub fn active_canteens_only(mut self) -> Self {
        self.active_canteens_only = true;
        self
    }

    pub fn created_since(mut self, since: DateTime<Utc>) -> Self {
        self.created_since = Some(since);
        self
    }

    pub fn order_by(mut self, order: Vec<SortKey>) -> Self {
        self.order = order;
        self
    }

    /// Menu-level predicates
    ///
    /// Canteen predicates (`canteen`, `active_canteens_only`) need the
    /// canteen rows and are evaluated by the store.
    pub fn matches(&self, item: &MenuStat) -> bool {
        if let Some(text) = &self.text
            && !item.text_matches(text)
        {
            return false;
        }
        if let Some(CanteenFilter::Id(id)) = &self.canteen
            && item.kantin_id != *id
        {
            return false;
        }
        if let Some(category) = &self.category
            && !category.matches(&item.kategori_menu)
        {
            return false;
        }
        if let Some(max) = self.max_price
            && item.harga as f64 > max
        {
            return false;
        }
        if let Some(min) = self.min_rating
            && item.avg_rating < min
        {
            return false;
        }
        if let Some(min) = self.min_reviews
            && item.total_ratings < min
        {
            return false;
        }
        if self.rated_only && item.avg_rating <= 0.0 {
            return false;
        }
        if self.sold_only && item.total_sold <= 0 {
            return false;
        }
        if self.only_available && !item.tersedia {
            return false;
        }
        if let Some(since) = self.created_since
            && item.created_at < since
        {
            return false;
        }
        true
    }

    /// Ordering for the configured sort keys, id ascending last
    pub fn compare(&self, a: &MenuStat, b: &MenuStat) -> Ordering {
        self.order
            .iter()
            .map(|key| key.compare(a, b))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::category::MINUMAN;
    use chrono::TimeZone;

    fn item(id: i64, harga: i64, sold: i64, rating: f64) -> MenuStat {
        MenuStat {
            id,
            kantin_id: 1,
            nama_menu: format!("Menu {id}"),
            deskripsi: None,
            kategori_menu: vec!["Makan Siang".to_string()],
            harga,
            tersedia: true,
            foto_menu: None,
            avg_rating: rating,
            total_ratings: 0,
            total_sold: sold,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_resolve_limit() {
        assert_eq!(resolve_limit(None, 10), 10);
        assert_eq!(resolve_limit(Some(0), 5), 5);
        assert_eq!(resolve_limit(Some(-3), 5), 5);
        assert_eq!(resolve_limit(Some(7), 5), 7);
        assert_eq!(resolve_limit(Some(500), 5), MAX_LIMIT);
    }

    #[test]
    fn test_canteen_id_takes_precedence() {
        assert_eq!(
            CanteenFilter::from_params(Some(3), Some("Teknik")),
            Some(CanteenFilter::Id(3))
        );
        assert_eq!(
            CanteenFilter::from_params(None, Some(" Teknik ")),
            Some(CanteenFilter::Name("Teknik".to_string()))
        );
        assert_eq!(CanteenFilter::from_params(None, Some("  ")), None);
        assert_eq!(CanteenFilter::from_params(None, None), None);
    }

    #[test]
    fn test_unknown_sort_falls_back() {
        assert_eq!(
            SortKey::resolve(Some("random"), &[SortKey::BestSellerDesc]),
            vec![SortKey::BestSellerDesc]
        );
        assert_eq!(
            SortKey::resolve(Some("PRICE_ASC"), &[SortKey::BestSellerDesc]),
            vec![SortKey::PriceAsc]
        );
        assert_eq!(SortKey::parse("newest"), None);
    }

    #[test]
    fn test_matches_filters() {
        let query = MenuQuery::new(10)
            .max_price(Some(15000.0))
            .min_rating(Some(4.0));
        assert!(query.matches(&item(1, 15000, 0, 4.5)));
        assert!(!query.matches(&item(2, 15001, 0, 4.5)));
        assert!(!query.matches(&item(3, 10000, 0, 3.9)));

        let mut unavailable = item(4, 1000, 0, 5.0);
        unavailable.tersedia = false;
        assert!(!query.matches(&unavailable));
        assert!(query.clone().only_available(false).matches(&unavailable));
    }

    #[test]
    fn test_matches_category_and_text() {
        let mut drink = item(1, 5000, 3, 0.0);
        drink.nama_menu = "Es Teh Manis".to_string();
        drink.kategori_menu = vec![MINUMAN.to_string()];

        let food = MenuQuery::new(10).category(CategoryFilter::from_token("makanan"));
        assert!(!food.matches(&drink));
        assert!(food.matches(&item(2, 5000, 3, 0.0)));

        let search = MenuQuery::new(10).text(Some("teh"));
        assert!(search.matches(&drink));
        assert!(!search.matches(&item(2, 5000, 3, 0.0)));
    }

    #[test]
    fn test_rated_and_sold_only() {
        let query = MenuQuery::new(5).rated_only().sold_only();
        assert!(query.matches(&item(1, 1000, 1, 0.1)));
        assert!(!query.matches(&item(2, 1000, 0, 4.0)));
        assert!(!query.matches(&item(3, 1000, 4, 0.0)));
    }

    #[test]
    fn test_compare_secondary_key_and_id_tiebreak() {
        let query = MenuQuery::new(5).order_by(vec![SortKey::PriceAsc, SortKey::BestSellerDesc]);
        let mut items = vec![
            item(4, 8000, 1, 0.0),
            item(3, 5000, 2, 0.0),
            item(1, 5000, 9, 0.0),
            item(2, 5000, 2, 0.0),
        ];
        items.sort_by(|a, b| query.compare(a, b));
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
