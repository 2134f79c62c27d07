//! Data table component types.
//!
//! These types define the column layout and empty state of the admin
//! tables, and render rows as plain text for terminal output.

use serde::{Deserialize, Serialize};

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is right-aligned.
    pub align_right: bool,
}

impl TableColumn {
    /// Create a new left-aligned column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            align_right: false,
        }
    }

    /// Create a new right-aligned column.
    #[must_use]
    pub fn right(key: &str, label: &str) -> Self {
        Self {
            align_right: true,
            ..Self::new(key, label)
        }
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            search_placeholder: "Search...".to_string(),
            empty_title: "No items found".to_string(),
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Render a header and rows as aligned plain text.
    ///
    /// Rows shorter than the column list are padded with empty cells.
    #[must_use]
    pub fn render(&self, rows: &[Vec<String>]) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(col.label.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<&str> = self.columns.iter().map(|c| c.label.as_str()).collect();
        let mut out = self.format_line(&widths, &header);
        for row in rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            out.push('\n');
            out.push_str(&self.format_line(&widths, &cells));
        }
        out
    }

    fn format_line(&self, widths: &[usize], cells: &[&str]) -> String {
        let line: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (col, &width))| {
                let cell = cells.get(i).copied().unwrap_or("");
                if col.align_right {
                    format!("{cell:>width$}")
                } else {
                    format!("{cell:<width$}")
                }
            })
            .collect();
        line.join("  ").trim_end().to_string()
    }
}

/// Build the users table configuration.
#[must_use]
pub fn users_table_config() -> DataTableConfig {
    DataTableConfig::new("users")
        .column(TableColumn::new("id", "ID"))
        .column(TableColumn::new("user", "User"))
        .column(TableColumn::new("email", "Email"))
        .column(TableColumn::new("role", "Role"))
        .column(TableColumn::new("address", "Address"))
        .column(TableColumn::new("joined", "Joined"))
        .search_placeholder("Search users...")
        .empty_state(
            "No users found",
            Some("Try adjusting your search or add a new user."),
        )
}

/// Build the products table configuration.
#[must_use]
pub fn products_table_config() -> DataTableConfig {
    DataTableConfig::new("products")
        .column(TableColumn::new("id", "ID"))
        .column(TableColumn::new("name", "Product"))
        .column(TableColumn::new("category", "Category"))
        .column(TableColumn::right("price", "Price"))
        .column(TableColumn::new("stock", "Stock"))
        .search_placeholder("Search products...")
        .empty_state("No products found", Some("Try adjusting your search."))
}

/// Build the coupons table configuration.
#[must_use]
pub fn coupons_table_config() -> DataTableConfig {
    DataTableConfig::new("coupons")
        .column(TableColumn::new("id", "ID"))
        .column(TableColumn::new("code", "Code"))
        .column(TableColumn::right("discount", "Discount"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("expires", "Expires"))
        .search_placeholder("Search coupons...")
        .empty_state("No coupons found", Some("Try adjusting your search."))
}
