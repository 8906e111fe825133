use serde::{Deserialize, Serialize};

/// Page sizes the table offers.
pub const PAGE_SIZE_OPTIONS: [i64; 3] = [10, 25, 50];

/// Page size used before the user picks one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Page parameters for the results table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_index: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn new(page_index: i64, page_size: i64) -> Self {
        PageRequest {
            page_index,
            page_size,
        }
    }

    /// Offset of the first record on this page.
    pub fn offset(&self) -> i64 {
        self.page_index * self.page_size
    }

    /// Validate page parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.page_index < 0 {
            return Err("Page index must be non-negative".to_string());
        }
        if !PAGE_SIZE_OPTIONS.contains(&self.page_size) {
            return Err(format!(
                "Page size must be one of {:?}",
                PAGE_SIZE_OPTIONS
            ));
        }
        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the size of the full result set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub total: i64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// An empty page reporting zero total results.
    pub fn empty() -> Self {
        Page {
            total: 0,
            results: Vec::new(),
        }
    }
}
