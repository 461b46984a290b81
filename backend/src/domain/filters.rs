//! Filter products and their lab-tested performance rows.

use std::collections::HashMap;

use rust_decimal::Decimal;

pub use water_contract::{
    FilterCategory, FilterPerformanceRecord as FilterPerformance,
    FilterProductRecord as FilterProduct,
};

/// Number of products returned by the recommendation stub.
pub const RECOMMENDATION_LIMIT: usize = 3;

/// Product awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFilterProduct {
    /// Product name.
    pub name: String,
    /// Manufacturer.
    pub brand: String,
    /// Marketing description.
    pub description: String,
    /// Retail price in euro.
    pub price: Decimal,
    /// Product image.
    pub image_url: Option<String>,
    /// Outbound shop link.
    pub affiliate_link: Option<String>,
    /// Installation category.
    pub category: FilterCategory,
}

/// Performance row awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFilterPerformance {
    /// Owning product; `None` leaves the row detached.
    pub filter_id: Option<i32>,
    /// Contaminant label.
    pub contaminant: String,
    /// Removal rate in percent.
    pub removal_rate: Decimal,
    /// Certification label.
    pub certification: Option<String>,
}

/// Nest performance rows under the products they reference.
///
/// Product order is preserved. Rows are kept in input order within each
/// product; rows without a matching product are dropped.
#[must_use]
pub fn attach_performance(
    products: Vec<FilterProduct>,
    rows: Vec<FilterPerformance>,
) -> Vec<FilterProduct> {
    let mut by_product: HashMap<i32, Vec<FilterPerformance>> = HashMap::new();
    for row in rows {
        if let Some(filter_id) = row.filter_id {
            by_product.entry(filter_id).or_default().push(row);
        }
    }

    products
        .into_iter()
        .map(|mut product| {
            product.performance = by_product.remove(&product.id).unwrap_or_default();
            product
        })
        .collect()
}
