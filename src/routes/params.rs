use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, de};
use utoipa::ToSchema;

use crate::config::{ITEMS_PER_PAGE, MAX_PAGE_SIZE};

/// Query string of the catalog listing. Empty values (the "All" choice of a filter
/// select) are read as "no filter".
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page_id: Option<u64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page_size: Option<u64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub brand_filter_applied: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub types_filter_applied: Option<i32>,
}

impl CatalogQuery {
    /// `(page_index, page_size)` with defaults applied and the size clamped to
    /// `MAX_PAGE_SIZE`. A zero size is passed through and rejected by the service.
    pub fn normalize(&self) -> (u64, u64) {
        let page_index = self.page_id.unwrap_or(0);
        let page_size = self.page_size.unwrap_or(ITEMS_PER_PAGE).min(MAX_PAGE_SIZE);
        (page_index, page_size)
    }
}

pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}
