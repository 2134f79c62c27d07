//! Product filter selection.
//!
//! [`Filters`] is the canonical selection held by the shared store and the
//! draft copy edited by the filter panel. Facet lists keep insertion order so
//! the serialized query is stable for a given sequence of clicks.

use serde::{Deserialize, Serialize};

/// Lower bound of the price slider, in rupees.
pub const PRICE_MIN: u32 = 0;
/// Upper bound of the price slider, in rupees.
pub const PRICE_MAX: u32 = 5000;

/// Colors offered by the filter panel.
pub const ALL_COLORS: &[&str] = &[
    "red",
    "blue",
    "green",
    "yellow",
    "black",
    "white",
    "gray",
    "pink",
    "purple",
    "orange",
    "brown",
    "light-blue",
];

/// Sizes offered by the filter panel.
pub const ALL_SIZES: &[&str] = &[
    "XS", "S", "M", "L", "XL", "XXL", "26", "28", "30", "32", "34", "36", "3-4Y", "5-6Y", "7-8Y",
    "ONE SIZE",
];

/// An ordered `[min, max]` price range in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct PriceRange {
    min: u32,
    max: u32,
}

impl PriceRange {
    /// Build a range from two slider thumbs.
    ///
    /// Values are clamped to the slider bounds and put in order.
    #[must_use]
    pub fn new(a: u32, b: u32) -> Self {
        let a = a.clamp(PRICE_MIN, PRICE_MAX);
        let b = b.clamp(PRICE_MIN, PRICE_MAX);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: PRICE_MIN,
            max: PRICE_MAX,
        }
    }
}

impl From<(u32, u32)> for PriceRange {
    fn from((a, b): (u32, u32)) -> Self {
        Self::new(a, b)
    }
}

impl From<PriceRange> for (u32, u32) {
    fn from(range: PriceRange) -> Self {
        (range.min, range.max)
    }
}

/// One of the multi-select facets of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterFacet {
    Category,
    Subcategory,
    Color,
    Size,
}

impl FilterFacet {
    /// Every facet, in query-parameter order.
    pub const ALL: [Self; 4] = [Self::Category, Self::Subcategory, Self::Color, Self::Size];

    /// Query parameter carrying this facet.
    #[must_use]
    pub const fn query_key(&self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Subcategory => "subcategories",
            Self::Color => "colors",
            Self::Size => "sizes",
        }
    }
}

/// The full filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    pub categories: Vec<String>,
    pub subcategories: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub price_range: PriceRange,
}

impl Filters {
    /// Selected values for a facet.
    #[must_use]
    pub fn values(&self, facet: FilterFacet) -> &[String] {
        match facet {
            FilterFacet::Category => &self.categories,
            FilterFacet::Subcategory => &self.subcategories,
            FilterFacet::Color => &self.colors,
            FilterFacet::Size => &self.sizes,
        }
    }

    fn values_mut(&mut self, facet: FilterFacet) -> &mut Vec<String> {
        match facet {
            FilterFacet::Category => &mut self.categories,
            FilterFacet::Subcategory => &mut self.subcategories,
            FilterFacet::Color => &mut self.colors,
            FilterFacet::Size => &mut self.sizes,
        }
    }

    /// Whether `value` is selected in `facet`.
    #[must_use]
    pub fn contains(&self, facet: FilterFacet, value: &str) -> bool {
        self.values(facet).iter().any(|v| v == value)
    }

    /// Flip membership of `value` in `facet`: add it if absent, remove it
    /// if present. Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, facet: FilterFacet, value: &str) -> bool {
        let values = self.values_mut(facet);
        if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
            false
        } else {
            values.push(value.to_owned());
            true
        }
    }

    /// Whether no facet value is selected and the price range is the full
    /// slider range.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }

    /// Serialize into listing query parameters.
    ///
    /// Each non-empty facet becomes one comma-joined parameter; empty facets
    /// are omitted entirely. `min_price` and `max_price` are always present.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = FilterFacet::ALL
            .iter()
            .filter_map(|facet| {
                let values = self.values(*facet);
                (!values.is_empty()).then(|| (facet.query_key(), values.join(",")))
            })
            .collect();

        pairs.push(("min_price", self.price_range.min().to_string()));
        pairs.push(("max_price", self.price_range.max().to_string()));
        pairs
    }
}
