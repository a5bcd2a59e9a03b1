use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

pub const PLACEHOLDER: &str = "Enter city";
pub const BUTTON_LABEL: &str = "[ Get Weather ]";

/// City text input with its submit button
pub struct CityInput {
    input: TextInput,
}

impl Default for CityInput {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

pub struct CityInputProps<'a> {
    pub value: &'a str,
    pub is_focused: bool,
}

impl CityInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_props(value: &str, is_focused: bool, bg: Option<Color>) -> TextInputProps<'_, Action> {
        TextInputProps {
            value,
            placeholder: PLACEHOLDER,
            is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::new(1, 0, 1, 0),
                    bg,
                    fg: bg.map(|_| Color::Black),
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: Action::CityInputChange,
            on_submit: Action::CitySubmit,
            on_cursor_move: Some(|_| Action::Render),
        }
    }
}

impl Component<Action> for CityInput {
    type Props<'a> = CityInputProps<'a>;

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

        // Submit with whatever is typed; the reducer drops empty input
        if key.code == KeyCode::Enter {
            return vec![Action::CitySubmit(props.value.to_string())];
        }

        self.input
            .handle_event(event, Self::input_props(props.value, true, None))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let button_width = BUTTON_LABEL.chars().count() as u16 + 2;
        let chunks = Layout::horizontal([Constraint::Min(10), Constraint::Length(button_width)])
            .split(area);

        self.input.render(
            frame,
            chunks[0],
            Self::input_props(props.value, props.is_focused, Some(Color::Rgb(245, 245, 245))),
        );

        let button = Line::from(vec![Span::styled(
            BUTTON_LABEL,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )])
        .centered();
        frame.render_widget(Paragraph::new(button), chunks[1]);
    }
}
