//! Product listing and filtering commands.
//!
//! # Usage
//!
//! ```bash
//! jk-cli products list --tab new-arrivals
//! jk-cli products filter --category women --color red --min 500 --max 2000
//! ```

use std::io::Write;

use clap::ValueEnum;
use jokroup_storefront::AppState;
use jokroup_storefront::filter_panel::FilterPanel;
use jokroup_storefront::listing::{ListingTab, ProductCard, ProductListing};

use crate::error::CliError;

/// Listing tab selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    All,
    NewArrivals,
    BestSellers,
}

impl From<TabArg> for ListingTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::All => Self::All,
            TabArg::NewArrivals => Self::NewArrivals,
            TabArg::BestSellers => Self::BestSellers,
        }
    }
}

/// Filter selections from the command line.
#[derive(Debug, Default, Clone)]
pub struct FilterArgs {
    pub categories: Vec<String>,
    pub subcategories: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
}

/// Show one listing tab.
///
/// # Errors
///
/// Returns error if the listing cannot be fetched or written.
pub async fn list(state: &AppState, out: &mut impl Write, tab: TabArg) -> Result<(), CliError> {
    let mut listing = ProductListing::new(state);
    listing.mount().await?;
    listing.select_tab(tab.into()).await?;

    writeln!(out, "{}", listing.tab().label())?;
    write_cards(out, &listing.cards())
}

/// Apply filters through the filter panel and show the result.
///
/// # Errors
///
/// Returns error if the filtered listing cannot be fetched or written.
pub async fn filter(state: &AppState, out: &mut impl Write, args: FilterArgs) -> Result<(), CliError> {
    let mut panel = FilterPanel::new(state);
    panel.open();
    for slug in &args.categories {
        panel.toggle_category(slug);
    }
    for slug in &args.subcategories {
        panel.toggle_subcategory(slug);
    }
    for color in &args.colors {
        panel.toggle_color(color);
    }
    for size in &args.sizes {
        panel.toggle_size(size);
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        let current = panel.draft().price_range;
        panel.set_price_range(
            args.min_price.unwrap_or(current.min()),
            args.max_price.unwrap_or(current.max()),
        );
    }

    let count = panel.apply().await?;
    tracing::info!(count, "Filters applied");

    let listing = ProductListing::new(state);
    writeln!(out, "{count} products match")?;
    write_cards(out, &listing.cards())
}

fn write_cards(out: &mut impl Write, cards: &[ProductCard]) -> Result<(), CliError> {
    if cards.is_empty() {
        writeln!(out, "No products found")?;
        return Ok(());
    }
    for card in cards {
        let mut line = format!("{:>6}  {}  {}", card.id.as_str(), card.name, card.price);
        if let Some(original) = &card.original_price {
            line.push_str(&format!(" (was {original})"));
        }
        if !card.badges.is_empty() {
            line.push_str(&format!("  [{}]", card.badges.join(", ")));
        }
        if let Some(rating) = &card.rating {
            line.push_str(&format!("  {rating}"));
        }
        if card.wishlisted {
            line.push_str("  ♥");
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}
