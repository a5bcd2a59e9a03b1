//! Action and state tests using EffectStore and TestHarness
//!
//! - Dispatch actions and check state and declared effects
//! - Send keys through components and assert the emitted actions

use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId, assert_emitted, assert_not_emitted};
use weathering_heights::{
    action::Action,
    api::FetchError,
    components::{Component, WeatherDisplay, WeatherDisplayProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, Notice, TempUnit, WeatherReading},
    theme::{Gradient, Icon},
};

fn paris() -> WeatherReading {
    WeatherReading {
        location_name: "Paris".into(),
        temperature_c: 22.0,
        condition_text: "Partly cloudy".into(),
        condition_icon: None,
    }
}

#[test]
fn test_reducer_city_submit() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.state().weather.is_empty());

    let result = store.dispatch(Action::CitySubmit("Paris".into()));
    assert!(result.changed, "State should change");
    assert!(store.state().weather.is_loading());
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(&result.effects[0], Effect::FetchWeather { city } if city == "Paris"));
}

#[test]
fn test_reducer_weather_load_themes_state() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::CitySubmit("Paris".into()));
    let result = store.dispatch(Action::WeatherDidLoad(paris()));

    assert!(store.state().weather.is_loaded());
    assert_eq!(store.state().reading(), Some(&paris()));
    assert_eq!(store.state().theme().gradient, Gradient::Mild);
    assert_eq!(result.effects, vec![Effect::SetFavicon(Icon::Clouds)]);
}

#[test]
fn test_reducer_missing_key_blocks_request() {
    let mut store = EffectStore::new(AppState::new(false), reducer);

    let result = store.dispatch(Action::CitySubmit("Paris".into()));

    assert!(result.effects.is_empty(), "No request may be sent");
    assert_eq!(store.state().notice, Some(Notice::missing_api_key()));
    assert!(store.state().weather.is_empty());
}

#[test]
fn test_reducer_toggle_units() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert_eq!(store.state().unit, TempUnit::Celsius);
    store.dispatch(Action::UiToggleUnits);
    assert_eq!(store.state().unit, TempUnit::Fahrenheit);
    store.dispatch(Action::UiToggleUnits);
    assert_eq!(store.state().unit, TempUnit::Celsius);
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::new(AppState {
        city_input: "Oslo".into(),
        ..Default::default()
    });
    let mut component = WeatherDisplay::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("enter", |state, event| {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::CitySubmit("Oslo".into()));
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = WeatherDisplay::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("enter f2 esc", |state, event| {
        let props = WeatherDisplayProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::WeatherDidLoad(WeatherReading::default());
    let toggle = Action::UiToggleUnits;
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("weather_did"));
    assert_eq!(toggle.category(), Some("ui"));
    assert_eq!(tick.category(), None);

    assert!(did_load.is_weather_did());
    assert!(toggle.is_ui());
}

#[test]
fn test_load_sets_favicon_per_condition() {
    let cases = [
        ("Sunny", Icon::Sun),
        ("Partly cloudy", Icon::Clouds),
        ("Patchy rain nearby", Icon::Rain),
        ("Light sleet", Icon::Snow),
        ("Thundery outbreaks possible", Icon::Thunder),
        ("Mist", Icon::Fallback),
    ];

    for (condition, icon) in cases {
        let mut store = EffectStore::new(AppState::default(), reducer);
        let result = store.dispatch(Action::WeatherDidLoad(WeatherReading {
            condition_text: condition.into(),
            ..paris()
        }));
        assert_eq!(result.effects, vec![Effect::SetFavicon(icon)], "{condition}");
        assert_eq!(store.state().theme().icon, icon, "{condition}");
    }
}

#[test]
fn test_from_fetch_maps_results() {
    assert_eq!(
        Action::from_fetch(Ok(paris())),
        Action::WeatherDidLoad(paris())
    );
    assert_eq!(
        Action::from_fetch(Err(FetchError::Status(404))),
        Action::WeatherDidError(
            "Failed to fetch weather (HTTP 404). Please ensure the location is correct.".into()
        )
    );
}

#[test]
fn test_display_keys_emit_actions() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = WeatherDisplay::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("f2 f5 esc", |state, event| {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    assert_emitted!(actions, Action::UiToggleUnits);
    assert_emitted!(actions, Action::WeatherRefresh);
    assert_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::CitySubmit(_));
}

#[test]
fn test_temp_unit_formatting() {
    assert_eq!(TempUnit::Celsius.format(22.0), "22°C");
    assert_eq!(TempUnit::Fahrenheit.format(22.0), "72°F");
    assert_eq!(TempUnit::Celsius.format(100.0), "100°C");
    assert_eq!(TempUnit::Fahrenheit.format(100.0), "212°F");
}
