use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use tui_dispatch::DataResource;

use super::Component;
use super::backdrop::to_color;
use crate::action::Action;
use crate::state::{AppState, TempUnit, WeatherReading};
use crate::theme::Theme;

pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
}

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let theme = props.state.theme();
        match WeatherView::from_state(props.state) {
            WeatherView::Ready(reading) => {
                render_ready(frame, area, reading, props.state.unit, &theme);
            }
            WeatherView::Loading => render_message(frame, area, "Loading...", &theme),
            WeatherView::Empty => render_hint(frame, area, &theme),
        }
    }
}

fn text_style(theme: &Theme) -> Style {
    Style::default().fg(to_color(theme.heading_color))
}

fn render_ready(
    frame: &mut Frame,
    area: Rect,
    reading: &WeatherReading,
    unit: TempUnit,
    theme: &Theme,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Icon
        Constraint::Length(1), // Location
        Constraint::Length(1), // Temperature
        Constraint::Length(1), // Condition
    ])
    .flex(Flex::Center)
    .split(area);

    let style = text_style(theme);
    let lines = [
        Line::from(theme.icon.glyph()),
        Line::from(Span::styled(
            reading.location_name.clone(),
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(unit.format(reading.temperature_c), style)),
        Line::from(Span::styled(reading.condition_text.clone(), style)),
    ];
    for (line, chunk) in lines.into_iter().zip(chunks.iter()) {
        frame.render_widget(Paragraph::new(line.centered()), *chunk);
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let [line_area] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    let msg = Line::from(vec![Span::styled(message.to_string(), text_style(theme))]).centered();
    frame.render_widget(Paragraph::new(msg), line_area);
}

fn render_hint(frame: &mut Frame, area: Rect, theme: &Theme) {
    let [line_area] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    let style = text_style(theme);
    let hint = Line::from(vec![
        Span::styled("Type a city and press ", style),
        Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), line_area);
}

// ============================================================================
// Helpers
// ============================================================================

enum WeatherView<'a> {
    Ready(&'a WeatherReading),
    Loading,
    Empty,
}

impl<'a> WeatherView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        match &state.weather {
            DataResource::Loaded(reading) => WeatherView::Ready(reading),
            DataResource::Loading => WeatherView::Loading,
            DataResource::Empty | DataResource::Failed(_) => WeatherView::Empty,
        }
    }
}
