//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::theme::{GradientPolicy, Theme, select_theme_with};

/// Current conditions from weatherapi.com
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReading {
    pub location_name: String,
    pub temperature_c: f32,
    pub condition_text: String,
    /// Icon URL supplied by the API, if any
    #[serde(default)]
    pub condition_icon: Option<String>,
}

impl Default for WeatherReading {
    fn default() -> Self {
        Self {
            location_name: String::new(),
            temperature_c: crate::theme::FALLBACK_TEMPERATURE_C,
            condition_text: String::new(),
            condition_icon: None,
        }
    }
}

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(&self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    /// Whole degrees, halves rounded up (`22.5` -> `23°C`, `-2.5` -> `-2°C`).
    pub fn format(&self, celsius: f32) -> String {
        match self {
            TempUnit::Celsius => format!("{}°C", round_half_up(celsius)),
            TempUnit::Fahrenheit => format!("{}°F", round_half_up(celsius * 9.0 / 5.0 + 32.0)),
        }
    }
}

fn round_half_up(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5).floor() as i32
}

/// What a blocking notice is about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum NoticeKind {
    /// Required configuration is missing; nothing was requested
    MissingConfig,
    /// The request or its response failed
    RequestFailed,
}

/// A message the user has to acknowledge before continuing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn missing_api_key() -> Self {
        Self {
            kind: NoticeKind::MissingConfig,
            message: "API key not set".into(),
        }
    }

    pub fn request_failed(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::RequestFailed,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::MissingConfig => "Configuration",
            NoticeKind::RequestFailed => "Error",
        }
    }
}

/// Gradient drift timing.
pub const TICK_MS: u64 = 100;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Text currently typed into the city input
    #[debug(section = "Input", label = "City")]
    pub city_input: String,

    /// City of the last request sent
    #[debug(section = "Input", label = "Last city", debug_fmt)]
    pub last_city: Option<String>,

    /// Reading lifecycle: Empty -> Loading -> Loaded, back to Empty on failure
    #[debug(section = "Weather", label = "Reading", debug_fmt)]
    pub weather: DataResource<WeatherReading>,

    /// Temperature unit preference
    #[debug(section = "Weather", label = "Unit", debug_fmt)]
    pub unit: TempUnit,

    /// Whether an API key was configured (the key itself never enters state)
    #[debug(section = "Config", label = "API key")]
    pub api_key_present: bool,

    #[debug(section = "Config", label = "Gradient", debug_fmt)]
    pub gradient_policy: GradientPolicy,

    /// Blocking notice, if one is open
    #[debug(section = "UI", label = "Notice", debug_fmt)]
    pub notice: Option<Notice>,

    /// Animation frame counter
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(api_key_present: bool) -> Self {
        Self {
            city_input: String::new(),
            last_city: None,
            weather: DataResource::Empty,
            unit: TempUnit::default(),
            api_key_present,
            gradient_policy: GradientPolicy::default(),
            notice: None,
            tick_count: 0,
        }
    }

    /// The last successfully fetched reading, if it is still current
    pub fn reading(&self) -> Option<&WeatherReading> {
        match &self.weather {
            DataResource::Loaded(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn theme(&self) -> Theme {
        select_theme_with(self.reading(), self.gradient_policy)
    }

    /// Milliseconds of gradient drift so far
    pub fn elapsed_ms(&self) -> u64 {
        u64::from(self.tick_count) * TICK_MS
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Gradient;

    #[test]
    fn test_format_rounds_to_whole_degrees() {
        assert_eq!(TempUnit::Celsius.format(22.0), "22°C");
        assert_eq!(TempUnit::Celsius.format(22.4), "22°C");
        assert_eq!(TempUnit::Celsius.format(22.5), "23°C");
        assert_eq!(TempUnit::Celsius.format(-0.3), "0°C");
        assert_eq!(TempUnit::Celsius.format(-2.5), "-2°C");
        assert_eq!(TempUnit::Fahrenheit.format(0.0), "32°F");
        assert_eq!(TempUnit::Fahrenheit.format(100.0), "212°F");
    }

    #[test]
    fn test_reading_only_when_loaded() {
        let mut state = AppState::default();
        assert!(state.reading().is_none());

        state.weather = DataResource::Loading;
        assert!(state.reading().is_none());

        state.weather = DataResource::Failed("boom".into());
        assert!(state.reading().is_none());
        assert_eq!(state.theme().gradient, Gradient::Fallback);

        state.weather = DataResource::Loaded(WeatherReading {
            location_name: "Oslo".into(),
            temperature_c: -3.0,
            condition_text: "Light snow".into(),
            condition_icon: None,
        });
        assert_eq!(state.reading().map(|r| r.location_name.as_str()), Some("Oslo"));
        assert_eq!(state.theme().gradient, Gradient::Cold);
    }

    #[test]
    fn test_theme_follows_policy() {
        let mut state = AppState {
            weather: DataResource::Loaded(WeatherReading {
                location_name: "Lima".into(),
                temperature_c: 18.0,
                condition_text: "Mist".into(),
                condition_icon: None,
            }),
            ..Default::default()
        };
        assert_eq!(state.theme().gradient, Gradient::Mild);

        state.gradient_policy = GradientPolicy::KeywordGated;
        assert_eq!(state.theme().gradient, Gradient::Fallback);
    }
}
