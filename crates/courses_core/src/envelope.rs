//! Paginated response envelope.
//!
//! # Invariants
//! - `page_count == ceil(total_number_of_items / page_size)`.
//! - `page_number` is reported as requested, never clamped.

use serde::{Deserialize, Serialize};

/// Result payload paired with paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope<T> {
    pub items: T,
    pub paging: PagingInfo,
}

/// Paging metadata for one page of a larger result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PagingInfo {
    pub page_count: u32,
    /// Items requested per page.
    pub page_size: u32,
    /// 1-based index of the returned page.
    pub page_number: u32,
    /// Item count across all pages.
    pub total_number_of_items: u32,
}

impl PagingInfo {
    /// Builds paging metadata for `total_number_of_items` split into pages.
    ///
    /// `page_size` must be non-zero; `CatalogConfig::validate` guarantees it
    /// for service callers. A zero size yields `page_count = 0`.
    pub fn new(total_number_of_items: u32, page_size: u32, page_number: u32) -> Self {
        let page_count = if page_size == 0 {
            0
        } else {
            total_number_of_items.div_ceil(page_size)
        };

        Self {
            page_count,
            page_size,
            page_number,
            total_number_of_items,
        }
    }
}

impl<T> Envelope<T> {
    pub fn new(items: T, paging: PagingInfo) -> Self {
        Self { items, paging }
    }
}
