//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::history::SearchHistory;

/// Current conditions for the searched city
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub city: String,
    /// Whole degrees Celsius
    pub temperature: i32,
    pub description: String,
    /// Provider icon identifier, e.g. `"01d"`
    pub icon: String,
}

/// One day of the forecast, taken from the provider's midday slot
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastEntry {
    /// Unix timestamp of the slot
    pub timestamp: i64,
    /// Short weekday name, e.g. `"Mon"`
    pub day: String,
    pub temperature: i32,
    pub description: String,
    pub icon: String,
}

/// Everything rendered after both requests succeed
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    pub current: WeatherSnapshot,
    pub forecast: Vec<ForecastEntry>,
}

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a city name.";
pub const SHORT_INPUT_MESSAGE: &str = "City name too short.";
pub const NOT_FOUND_MESSAGE: &str = "City not found. Please check spelling.";
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Minimum accepted city name length, in characters.
pub const MIN_CITY_LEN: usize = 2;

/// Why a weather fetch failed, as far as the user is concerned
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FetchFailure {
    /// Provider answered 404 for the city
    NotFound,
    /// Anything else; carries the underlying error for logs/debug
    Failed(String),
}

impl FetchFailure {
    pub fn message(&self) -> &'static str {
        match self {
            FetchFailure::NotFound => NOT_FOUND_MESSAGE,
            FetchFailure::Failed(_) => GENERIC_ERROR_MESSAGE,
        }
    }
}

pub const SEARCH_LABEL: &str = "Search";
pub const SEARCHING_LABEL: &str = "Searching...";

/// Spinner frame interval while a search is in flight.
pub const SPINNER_TICK_MS: u64 = 80;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Text currently in the search box
    #[debug(section = "Search", label = "Input")]
    pub input: String,

    /// Search control is disabled while a fetch is in flight
    #[debug(section = "Search", label = "Searching")]
    pub searching: bool,

    /// Display region: Empty (welcome) → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Display", debug_fmt)]
    pub display: DataResource<WeatherReport>,

    /// Generation of the latest fetch; older results are dropped
    #[debug(section = "Weather", label = "Request")]
    pub request_id: u64,

    #[debug(section = "History", label = "Recent", debug_fmt)]
    pub history: SearchHistory,

    #[debug(section = "History", label = "Last city", debug_fmt)]
    pub last_city: Option<String>,

    /// City requested on the command line, consumed by `Init`
    #[debug(skip)]
    pub startup_city: Option<String>,

    /// Highlighted recent search, `None` while typing
    #[debug(skip)]
    pub history_selected: Option<usize>,

    /// Clear-history confirmation is open
    #[debug(skip)]
    pub confirm_clear: bool,

    /// Last persistence failure, shown under the recent searches
    #[debug(skip)]
    pub storage_error: Option<String>,

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// Create state from what was persisted by a previous session
    pub fn new(history: SearchHistory, last_city: Option<String>) -> Self {
        Self {
            input: String::new(),
            searching: false,
            display: DataResource::Empty,
            request_id: 0,
            history,
            last_city,
            startup_city: None,
            history_selected: None,
            confirm_clear: false,
            storage_error: None,
            tick_count: 0,
        }
    }

    pub fn with_startup_city(mut self, city: Option<String>) -> Self {
        self.startup_city = city.filter(|c| !c.trim().is_empty());
        self
    }

    /// Label of the search control
    pub fn search_label(&self) -> &'static str {
        if self.searching {
            SEARCHING_LABEL
        } else {
            SEARCH_LABEL
        }
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.display.data()
    }

    /// City a refresh re-fetches: the last successful search.
    pub fn refresh_city(&self) -> Option<&str> {
        self.last_city.as_deref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SearchHistory::default(), None)
    }
}
