use artbox::{Alignment as ArtAlignment, Fill, Renderer, fonts, integrations::ratatui::ArtBox};
use ratatui::{Frame, layout::Rect, style::Style, widgets::Block};

use super::Component;
use super::backdrop::to_color;
use crate::action::Action;
use crate::favicon::APP_TITLE;
use crate::theme::Rgb;

/// App title drawn in the theme's heading color on a solid band
pub struct Heading;

pub struct HeadingProps {
    pub color: Rgb,
    pub band: Rgb,
}

/// Rows the title uses with the largest font.
pub const HEADING_MAX_HEIGHT: u16 = 6;

impl Component<Action> for Heading {
    type Props<'a> = HeadingProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        frame.render_widget(
            Block::default().style(Style::default().bg(to_color(props.band))),
            area,
        );

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(Fill::solid(props.color));

        frame.render_widget(ArtBox::new(&renderer, APP_TITLE), area);
    }
}
