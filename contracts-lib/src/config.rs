//! Client and table configuration

use std::time::Duration;

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "CONTRACTS_API_URL";

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Settings for [`ContractsClient`](crate::ContractsClient).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use contracts_lib::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("https://contracts.example.com")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.base_url, "https://contracts.example.com");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root, without the `/api` prefix.
    ///
    /// Default: `http://localhost:8000`
    pub base_url: String,

    /// Per-request timeout.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Connection establishment timeout.
    ///
    /// Default: none
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the base URL taken from `CONTRACTS_API_URL` when set.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::default().with_base_url(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

/// Feature flags and sizing for a [`TableView`](crate::view::TableView).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Free-text search box. Default: on.
    pub searchable: bool,
    /// Per-column filter dropdowns. Default: on.
    pub filterable: bool,
    /// Header click sorting. Default: on.
    pub sortable: bool,
    /// Split results into pages. Default: on.
    pub paginated: bool,
    /// Rows per page. Default: 10. Zero is treated as 1.
    pub page_size: usize,
    /// Character budget for party cells. Default: 40.
    pub parties_width: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            searchable: true,
            filterable: true,
            sortable: true,
            paginated: true,
            page_size: 10,
            parties_width: 40,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_paginated(mut self, paginated: bool) -> Self {
        self.paginated = paginated;
        self
    }

    pub fn with_parties_width(mut self, width: usize) -> Self {
        self.parties_width = width;
        self
    }

    pub(crate) fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}
