//! Render tests using RenderHarness
//!
//! Each display state is rendered to a plain-text buffer and checked for the
//! strings a user would read.

use tui_dispatch::{DataResource, testing::*};
use skyfetch::{
    components::{Component, ConfirmDialog, ConfirmDialogProps, WeatherDisplay, WeatherDisplayProps},
    history::SearchHistory,
    state::{AppState, ForecastEntry, WeatherReport, WeatherSnapshot},
};

fn render(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut component = WeatherDisplay::new();

    render.render_to_string_plain(|frame| {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

fn forecast_day(day: &str, temperature: i32, description: &str) -> ForecastEntry {
    ForecastEntry {
        timestamp: 0,
        day: day.into(),
        temperature,
        description: description.into(),
        icon: "10d".into(),
    }
}

#[test]
fn test_render_welcome() {
    let output = render(&AppState::default(), 80, 24);

    assert!(
        output.contains("Search any city to see weather & 5-day forecast"),
        "Should show welcome prompt:\n{}",
        output
    );
    assert!(!output.contains("Recent:"), "No history, no recent list");
}

#[test]
fn test_render_loading_state() {
    let state = AppState {
        display: DataResource::Loading,
        searching: true,
        tick_count: 3,
        ..Default::default()
    };

    let output = render(&state, 60, 20);

    assert!(output.contains("Loading weather..."));
    assert!(output.contains("Searching..."), "Control shows busy label");
}

#[test]
fn test_render_current_and_forecast() {
    let state = AppState {
        display: DataResource::Loaded(WeatherReport {
            current: WeatherSnapshot {
                city: "Bergen".into(),
                temperature: -3,
                description: "light snow".into(),
                icon: "13n".into(),
            },
            forecast: vec![
                forecast_day("Tue", 2, "light rain"),
                forecast_day("Wed", 4, "overcast clouds"),
            ],
        }),
        ..Default::default()
    };

    let output = render(&state, 90, 28);

    assert!(output.contains("Bergen"));
    assert!(output.contains("-3°C"));
    assert!(output.contains("light snow"));
    assert!(output.contains("5-Day Forecast"));
    assert!(output.contains("Tue"));
    assert!(output.contains("2°C"));
    assert!(output.contains("Wed"));
}

#[test]
fn test_render_empty_forecast() {
    let state = AppState {
        display: DataResource::Loaded(WeatherReport {
            current: WeatherSnapshot {
                city: "Reykjavik".into(),
                temperature: 6,
                description: "mist".into(),
                icon: "50d".into(),
            },
            forecast: Vec::new(),
        }),
        ..Default::default()
    };

    let output = render(&state, 80, 28);

    assert!(output.contains("Reykjavik"));
    assert!(output.contains("No forecast available"));
}

#[test]
fn test_render_error_state() {
    let state = AppState {
        display: DataResource::Failed("City name too short.".into()),
        ..Default::default()
    };

    let output = render(&state, 60, 20);

    assert!(output.contains("Error"), "Should show error label");
    assert!(output.contains("City name too short."), "Should show message");
    assert!(output.contains("try again"), "Should show retry hint");
}

#[test]
fn test_render_recent_searches() {
    let state = AppState {
        history: SearchHistory::from_entries(vec!["Lima".into(), "Kyiv".into(), "Doha".into()]),
        ..Default::default()
    };

    let output = render(&state, 80, 24);

    assert!(output.contains("Recent: Lima · Kyiv · Doha"), "got:\n{}", output);
}

#[test]
fn test_render_help_bar() {
    let output = render(&AppState::default(), 80, 24);

    assert!(output.contains("search"), "Should show search hint");
    assert!(output.contains("clear history"), "Should show clear hint");
    assert!(output.contains("quit"), "Should show quit hint");
}

#[test]
fn test_render_placeholder_when_empty() {
    let output = render(&AppState::default(), 80, 24);

    assert!(output.contains("Enter a city name..."));
    assert!(output.contains("[ Search ]"));
}

#[test]
fn test_render_confirm_dialog() {
    let mut render = RenderHarness::new(80, 24);
    let mut dialog = ConfirmDialog::new();

    let output = render.render_to_string_plain(|frame| {
        let props = ConfirmDialogProps {
            is_open: true,
            is_focused: true,
            count: 1,
        };
        dialog.render(frame, frame.area(), props);
    });

    assert!(output.contains("Clear recent searches?"));
    assert!(output.contains("1 city will be forgotten."));
}
