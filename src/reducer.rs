//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Notice};
use crate::theme::Icon;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== City actions =====
        Action::CityInputChange(text) => {
            if text == state.city_input {
                return DispatchResult::unchanged();
            }
            state.city_input = text;
            DispatchResult::changed()
        }

        Action::CitySubmit(city) => submit(state, city),

        // ===== Weather actions =====
        Action::WeatherRefresh => match state.last_city.clone() {
            Some(city) => submit(state, city),
            None => DispatchResult::unchanged(),
        },

        Action::WeatherDidLoad(reading) => {
            let icon = Icon::from_condition(&reading.condition_text);
            state.weather = DataResource::Loaded(reading);
            DispatchResult::changed_with(Effect::SetFavicon(icon))
        }

        Action::WeatherDidError(message) => {
            state.weather = DataResource::Empty;
            state.notice = Some(Notice::request_failed(message));
            DispatchResult::changed()
        }

        // ===== Notice actions =====
        Action::NoticeDismiss => {
            if state.notice.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== UI actions =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn submit(state: &mut AppState, city: String) -> DispatchResult<Effect> {
    let city = city.trim().to_string();
    if city.is_empty() {
        return DispatchResult::unchanged();
    }
    if !state.api_key_present {
        state.notice = Some(Notice::missing_api_key());
        return DispatchResult::changed();
    }

    state.city_input = city.clone();
    state.last_city = Some(city.clone());
    state.weather = DataResource::Loading;
    DispatchResult::changed_with(Effect::FetchWeather { city })
}
