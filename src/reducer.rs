//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, EMPTY_INPUT_MESSAGE, MIN_CITY_LEN, SHORT_INPUT_MESSAGE};

/// Trim and check a typed city name.
pub fn validate_city(input: &str) -> Result<String, &'static str> {
    let city = input.trim();
    if city.is_empty() {
        return Err(EMPTY_INPUT_MESSAGE);
    }
    if city.chars().count() < MIN_CITY_LEN {
        return Err(SHORT_INPUT_MESSAGE);
    }
    Ok(city.to_string())
}

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Startup =====
        Action::Init => {
            let city = state
                .startup_city
                .take()
                .or_else(|| state.last_city.clone());
            match city {
                Some(city) => begin_fetch(state, city),
                None => {
                    state.display = DataResource::Empty;
                    DispatchResult::changed()
                }
            }
        }

        // ===== Search actions =====
        Action::SearchInputChange(text) => {
            if state.input == text {
                return DispatchResult::unchanged();
            }
            state.input = text;
            state.history_selected = None;
            DispatchResult::changed()
        }

        Action::SearchSubmit(text) => match validate_city(&text) {
            Ok(city) => {
                state.input.clear();
                begin_fetch(state, city)
            }
            Err(message) => {
                state.display = DataResource::Failed(message.to_string());
                DispatchResult::changed()
            }
        },

        // ===== Weather actions =====
        Action::WeatherFetch(city) => begin_fetch(state, city),

        Action::WeatherDidLoad {
            request_id,
            city,
            report,
        } => {
            if request_id != state.request_id {
                return DispatchResult::unchanged();
            }
            state.display = DataResource::Loaded(report);
            state.searching = false;

            let Some(name) = state.history.record(&city) else {
                return DispatchResult::changed();
            };
            state.history_selected = None;
            state.last_city = Some(name.clone());
            DispatchResult::changed_with_many(vec![
                Effect::SaveHistory {
                    cities: state.history.entries().to_vec(),
                },
                Effect::SaveLastCity { city: name },
            ])
        }

        Action::WeatherDidError {
            request_id,
            failure,
        } => {
            if request_id != state.request_id {
                return DispatchResult::unchanged();
            }
            state.display = DataResource::Failed(failure.message().to_string());
            state.searching = false;
            DispatchResult::changed()
        }

        // ===== History actions =====
        Action::HistorySelectNext => {
            let len = state.history.len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let next = match state.history_selected {
                None => 0,
                Some(index) => (index + 1).min(len - 1),
            };
            if state.history_selected == Some(next) {
                return DispatchResult::unchanged();
            }
            state.history_selected = Some(next);
            DispatchResult::changed()
        }

        Action::HistorySelectPrev => match state.history_selected {
            None => DispatchResult::unchanged(),
            Some(0) => {
                state.history_selected = None;
                DispatchResult::changed()
            }
            Some(index) => {
                state.history_selected = Some(index - 1);
                DispatchResult::changed()
            }
        },

        Action::HistoryActivate => {
            let Some(city) = state
                .history_selected
                .and_then(|index| state.history.get(index))
                .map(str::to_string)
            else {
                return DispatchResult::unchanged();
            };
            state.input.clear();
            begin_fetch(state, city)
        }

        Action::HistoryClearRequest => {
            if state.history.is_empty() || state.confirm_clear {
                return DispatchResult::unchanged();
            }
            state.confirm_clear = true;
            DispatchResult::changed()
        }

        Action::HistoryClearConfirm => {
            if !state.confirm_clear {
                return DispatchResult::unchanged();
            }
            state.confirm_clear = false;
            state.history.clear();
            state.history_selected = None;
            DispatchResult::changed_with(Effect::ClearHistory)
        }

        Action::HistoryClearCancel => {
            if !state.confirm_clear {
                return DispatchResult::unchanged();
            }
            state.confirm_clear = false;
            DispatchResult::changed()
        }

        // ===== Storage actions =====
        Action::StorageDidSave => {
            if state.storage_error.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::StorageDidError(msg) => {
            state.storage_error = Some(msg);
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.searching {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Show loading, disable the search control and start a new request generation.
fn begin_fetch(state: &mut AppState, city: String) -> DispatchResult<Effect> {
    state.request_id = state.request_id.wrapping_add(1);
    state.display = DataResource::Loading;
    state.searching = true;
    state.history_selected = None;
    state.tick_count = 0;
    DispatchResult::changed_with(Effect::FetchWeather {
        city,
        request_id: state.request_id,
    })
}
