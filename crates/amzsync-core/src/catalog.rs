use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Regional storefront a product is listed on.
///
/// Unknown codes deserialize as [`Marketplace::Fr`], the primary storefront,
/// so URL construction stays total even on sloppy catalog data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marketplace {
    #[default]
    Fr,
    Uk,
    De,
    Es,
    It,
}

impl Marketplace {
    /// Parse a storefront code (`"FR"`, `"UK"`, ...). Unknown codes fall back
    /// to the primary marketplace.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "UK" => Marketplace::Uk,
            "DE" => Marketplace::De,
            "ES" => Marketplace::Es,
            "IT" => Marketplace::It,
            _ => Marketplace::Fr,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Marketplace::Fr => "FR",
            Marketplace::Uk => "UK",
            Marketplace::De => "DE",
            Marketplace::Es => "ES",
            Marketplace::It => "IT",
        }
    }

    /// Storefront domain used for both affiliate URLs and detail pages.
    #[must_use]
    pub fn domain(self) -> &'static str {
        match self {
            Marketplace::Fr => "amazon.fr",
            Marketplace::Uk => "amazon.co.uk",
            Marketplace::De => "amazon.de",
            Marketplace::Es => "amazon.es",
            Marketplace::It => "amazon.it",
        }
    }
}

impl std::fmt::Display for Marketplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Marketplace {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Marketplace {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Marketplace::from_code(&code))
    }
}

/// One product reference from the source catalog.
///
/// Fields beyond the ones named here are preserved verbatim in `extra` and
/// flow unchanged into the enriched output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEntry {
    pub asin: String,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<Marketplace>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProductEntry {
    #[must_use]
    pub fn marketplace_or_default(&self) -> Marketplace {
        self.marketplace.unwrap_or_default()
    }

    /// Human-readable label for logs; falls back to the ASIN.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.asin)
    }
}

/// A catalog entry plus the fields this pipeline resolves for it.
///
/// Built exactly once per [`ProductEntry`] per run; `local_image` is either a
/// real asset path or the fixed placeholder path, never absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedProduct {
    #[serde(flatten)]
    pub product: ProductEntry,
    pub affiliate_url: String,
    pub local_image: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog {path} is not a valid product list: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the product catalog from a JSON file.
///
/// Catalog integrity is all-or-nothing: a missing file, an unreadable file,
/// or any entry missing its required fields fails the whole load.
///
/// # Errors
///
/// Returns [`CatalogError`] if the file cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<Vec<ProductEntry>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}
