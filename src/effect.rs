//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current conditions and forecast for the city
    FetchWeather { city: String, request_id: u64 },
    /// Persist the recent searches (newest first)
    SaveHistory { cities: Vec<String> },
    /// Persist the last successfully searched city
    SaveLastCity { city: String },
    /// Drop the persisted recent searches
    ClearHistory,
}
