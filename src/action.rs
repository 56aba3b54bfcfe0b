//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{FetchFailure, WeatherReport};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Search category =====
    /// Search box text changed
    SearchInputChange(String),

    /// Submit the search box (validated before anything is fetched)
    SearchSubmit(String),

    // ===== Weather category =====
    /// Intent: fetch weather + forecast for a city (triggers async task)
    WeatherFetch(String),

    /// Result: both requests succeeded
    WeatherDidLoad {
        request_id: u64,
        city: String,
        report: WeatherReport,
    },

    /// Result: either request failed
    WeatherDidError {
        request_id: u64,
        failure: FetchFailure,
    },

    // ===== History category =====
    /// Move the recent-search highlight towards older entries
    HistorySelectNext,

    /// Move the highlight towards newer entries (and back to the input)
    HistorySelectPrev,

    /// Search the highlighted recent city
    HistoryActivate,

    /// Ask for confirmation before clearing
    HistoryClearRequest,

    /// Confirmed: clear recent searches
    HistoryClearConfirm,

    /// Declined: keep recent searches
    HistoryClearCancel,

    // ===== Storage category =====
    /// Result: a persistence write finished
    StorageDidSave,

    /// Result: a persistence write failed
    StorageDidError(String),

    // ===== Uncategorized (global) =====
    /// Startup: fetch the last city or show the welcome screen
    Init,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
