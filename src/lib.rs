//! SkyFetch - city weather and 5-day forecast in the terminal
//!
//! The library exposes the app's modules so the binary and the tests share them.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod forecast;
pub mod history;
pub mod icons;
pub mod logging;
pub mod reducer;
pub mod state;
pub mod storage;
