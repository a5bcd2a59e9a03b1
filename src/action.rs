//! Actions, grouped into categories by name prefix

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::FetchError;
use crate::state::WeatherReading;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== City category =====
    /// City input text changed
    CityInputChange(String),

    /// Submit the city (Enter / "Get Weather"); empty input is ignored
    CitySubmit(String),

    // ===== Weather category =====
    /// Re-request the last submitted city
    WeatherRefresh,

    /// Result: reading parsed successfully
    WeatherDidLoad(WeatherReading),

    /// Result: request failed (HTTP status, network or body)
    WeatherDidError(String),

    // ===== Notice category =====
    /// Acknowledge the open notice
    NoticeDismiss,

    // ===== UI category =====
    /// Toggle between Celsius and Fahrenheit
    UiToggleUnits,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the gradient drift
    Tick,

    /// Exit the application
    Quit,
}

impl Action {
    /// Result action for a finished weather request.
    pub fn from_fetch(result: Result<WeatherReading, FetchError>) -> Self {
        match result {
            Ok(reading) => Action::WeatherDidLoad(reading),
            Err(e) => Action::WeatherDidError(e.to_string()),
        }
    }
}
