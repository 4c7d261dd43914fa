//! Category token → membership filter
//!
//! | token         | filter                        |
//! |---------------|-------------------------------|
//! | `makan_pagi`  | contains "Makan Pagi"         |
//! | `makan_siang` | contains "Makan Siang"        |
//! | `snack`       | contains "Snack"              |
//! | `minuman`     | contains "Minuman"            |
//! | `makanan`     | does NOT contain "Minuman"    |
//!
//! Anything else means "no category filter".

pub const MAKAN_PAGI: &str = "Makan Pagi";
pub const MAKAN_SIANG: &str = "Makan Siang";
pub const SNACK: &str = "Snack";
pub const MINUMAN: &str = "Minuman";

/// Category membership predicate over a menu item's label list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Label list contains the label
    Contains(&'static str),
    /// Label list does not contain the label
    Excludes(&'static str),
}

impl CategoryFilter {
    /// Resolve a caller token; unknown or blank tokens yield `None`
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "makan_pagi" => Some(Self::Contains(MAKAN_PAGI)),
            "makan_siang" => Some(Self::Contains(MAKAN_SIANG)),
            "snack" => Some(Self::Contains(SNACK)),
            "minuman" => Some(Self::Contains(MINUMAN)),
            // food = everything that is not a drink
            "makanan" => Some(Self::Excludes(MINUMAN)),
            other => {
                if !other.is_empty() {
                    tracing::debug!(token = other, "Unknown kategori token, no filter applied");
                }
                None
            }
        }
    }

    /// Resolve an optional token
    pub fn resolve(token: Option<&str>) -> Option<Self> {
        token.and_then(Self::from_token)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Contains(label) | Self::Excludes(label) => label,
        }
    }

    pub fn matches(&self, categories: &[String]) -> bool {
        let tagged = categories.iter().any(|c| c == self.label());
        match self {
            Self::Contains(_) => tagged,
            Self::Excludes(_) => !tagged,
        }
    }
}
