use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogItemViewModel {
    pub id: i32,
    pub name: String,
    pub picture_uri: String,
    pub price: i64,
}

/// One selectable entry of a brand or type filter. The synthetic "All" entry has no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FacetOption {
    pub value: Option<i32>,
    pub text: String,
    pub selected: bool,
}

impl FacetOption {
    pub fn all() -> Self {
        Self {
            value: None,
            text: "All".to_string(),
            selected: true,
        }
    }
}

/// Builds a facet list: entries sorted by display text, prefixed with "All".
pub fn facet_options(entries: impl IntoIterator<Item = (i32, String)>) -> Vec<FacetOption> {
    let mut options: Vec<FacetOption> = entries
        .into_iter()
        .map(|(id, text)| FacetOption {
            value: Some(id),
            text,
            selected: false,
        })
        .collect();
    options.sort_by(|a, b| a.text.cmp(&b.text));
    options.insert(0, FacetOption::all());
    options
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationInfo {
    pub actual_page: u64,
    /// Number of items actually returned on this page.
    pub items_per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl PaginationInfo {
    /// `page_size` must be non-zero.
    pub fn new(actual_page: u64, items_on_page: usize, total_items: u64, page_size: u64) -> Self {
        let total_pages = total_items.div_ceil(page_size);
        let last_page = total_pages.saturating_sub(1);
        Self {
            actual_page,
            items_per_page: items_on_page as u64,
            total_items,
            total_pages,
            previous_disabled: actual_page == 0,
            next_disabled: actual_page >= last_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogIndexViewModel {
    pub catalog_items: Vec<CatalogItemViewModel>,
    pub brands: Vec<FacetOption>,
    pub types: Vec<FacetOption>,
    pub brand_filter_applied: Option<i32>,
    pub types_filter_applied: Option<i32>,
    pub pagination_info: PaginationInfo,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCatalogItemRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, max = 1_000_000_000, message = "price is out of range"))]
    pub price: i64,
}
