//! Request bodies of the `/api/tools/*` endpoints
//!
//! All fields are optional; numeric fields accept numbers or numeric strings.

use serde::Deserialize;

use crate::api::extract::lenient;
use crate::catalog::{CanteenFilter, CategoryFilter};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchMenuParams {
    pub query: Option<String>,
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub kantin_id: Option<i64>,
    pub kantin_name: Option<String>,
    pub kategori: Option<String>,
    #[serde(deserialize_with = "lenient::f64_opt")]
    pub max_price: Option<f64>,
    #[serde(deserialize_with = "lenient::f64_opt")]
    pub min_rating: Option<f64>,
    pub only_available: Option<bool>,
    pub sort: Option<String>,
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListByKantinParams {
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub kantin_id: Option<i64>,
    pub kantin_name: Option<String>,
    pub kategori: Option<String>,
    pub only_available: Option<bool>,
    pub sort: Option<String>,
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub limit: Option<i64>,
}

/// Shared by cheapest / priciest / popular
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RankingParams {
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub kantin_id: Option<i64>,
    pub kantin_name: Option<String>,
    pub kategori: Option<String>,
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TopRatedParams {
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub kantin_id: Option<i64>,
    pub kantin_name: Option<String>,
    pub kategori: Option<String>,
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub min_reviews: Option<i64>,
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UnderPriceParams {
    #[serde(deserialize_with = "lenient::f64_opt")]
    pub max_price: Option<f64>,
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub kantin_id: Option<i64>,
    pub kantin_name: Option<String>,
    pub kategori: Option<String>,
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewMenuParams {
    pub period: Option<String>,
    pub kantin_name: Option<String>,
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct KantinInfoParams {
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub kantin_id: Option<i64>,
    pub kantin_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListKantinParams {
    pub only_open: Option<bool>,
}

/// Canteen and category selectors common to most tools
pub trait CatalogScope {
    fn kantin_id(&self) -> Option<i64>;
    fn kantin_name(&self) -> Option<&str>;
    fn kategori(&self) -> Option<&str>;

    fn canteen(&self) -> Option<CanteenFilter> {
        CanteenFilter::from_params(self.kantin_id(), self.kantin_name())
    }

    fn category(&self) -> Option<CategoryFilter> {
        CategoryFilter::resolve(self.kategori())
    }
}

macro_rules! impl_catalog_scope {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CatalogScope for $ty {
                fn kantin_id(&self) -> Option<i64> {
                    self.kantin_id
                }
                fn kantin_name(&self) -> Option<&str> {
                    self.kantin_name.as_deref()
                }
                fn kategori(&self) -> Option<&str> {
                    self.kategori.as_deref()
                }
            }
        )*
    };
}

impl_catalog_scope!(
    SearchMenuParams,
    ListByKantinParams,
    RankingParams,
    TopRatedParams,
    UnderPriceParams,
);
