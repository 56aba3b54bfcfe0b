pub mod confirm_dialog;
pub mod forecast_cards;
pub mod recent_searches;
pub mod search_bar;
pub mod weather_body;
pub mod weather_display;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use confirm_dialog::{ConfirmDialog, ConfirmDialogProps};
pub use forecast_cards::{ForecastCards, ForecastCardsProps};
pub use recent_searches::{RecentSearches, RecentSearchesProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_body::{WeatherBody, WeatherBodyProps};
pub use weather_display::{ERROR_ICON, WeatherDisplay, WeatherDisplayProps};
