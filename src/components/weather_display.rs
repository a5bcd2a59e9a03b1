use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::heading::HEADING_MAX_HEIGHT;
use super::{
    Backdrop, BackdropProps, CityInput, CityInputProps, Component, Heading, HeadingProps,
    WeatherBody, WeatherBodyProps,
};
use crate::action::Action;
use crate::state::AppState;

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main screen: heading, city input, reading block and help bar
#[derive(Default)]
pub struct WeatherDisplay {
    input: CityInput,
}

impl WeatherDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::F(2) => return vec![Action::UiToggleUnits],
            KeyCode::F(5) => return vec![Action::WeatherRefresh],
            _ => {}
        }

        // Everything else is typing
        self.input
            .handle_event(
                event,
                CityInputProps {
                    value: &props.state.city_input,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let state = props.state;
        let theme = state.theme();

        let mut backdrop = Backdrop;
        backdrop.render(
            frame,
            area,
            BackdropProps {
                gradient: theme.gradient,
                phase: theme.phase_at(state.elapsed_ms()),
            },
        );

        let chunks = Layout::vertical([
            Constraint::Length(1),               // Top margin
            Constraint::Max(HEADING_MAX_HEIGHT), // Heading
            Constraint::Length(1),               // Spacer
            Constraint::Length(3),               // City input
            Constraint::Min(4),                  // Reading
            Constraint::Length(1),               // Help bar
        ])
        .split(area);

        let mut heading = Heading;
        heading.render(
            frame,
            chunks[1],
            HeadingProps {
                color: theme.heading_color,
                band: theme.gradient.mid(),
            },
        );

        let [_, input_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(60),
            Constraint::Fill(1),
        ])
        .areas(chunks[3]);
        self.input.render(
            frame,
            input_area,
            CityInputProps {
                value: &state.city_input,
                is_focused: props.is_focused,
            },
        );

        let mut body = WeatherBody;
        body.render(frame, chunks[4], WeatherBodyProps { state });

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[5],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "get weather"),
                    StatusBarHint::new("F2", "units"),
                    StatusBarHint::new("F5", "refresh"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
