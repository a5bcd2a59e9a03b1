use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::Component;
use crate::action::Action;
use crate::state::{Notice, NoticeKind};

pub const NOTICE_ICON: &str = "\u{26a0}\u{fe0f}";

const MIN_WIDTH: u16 = 20;
const MIN_HEIGHT: u16 = 7;

/// Blocking notice; the rest of the UI waits until it is dismissed
pub struct NoticeModal {
    modal: Modal,
}

pub struct NoticeModalProps<'a> {
    pub notice: &'a Notice,
    pub is_focused: bool,
}

impl Default for NoticeModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl NoticeModal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for NoticeModal {
    type Props<'a> = NoticeModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Action::Quit)
                }
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::NoticeDismiss),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let notice = props.notice;
        let accent = match notice.kind {
            NoticeKind::MissingConfig => Color::Yellow,
            NoticeKind::RequestFailed => Color::Red,
        };

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            render_compact(frame, area, notice, accent);
            return;
        }

        let modal_area = centered_rect(56, 9, area);

        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // title
                Constraint::Length(1), // blank
                Constraint::Min(1),    // message
                Constraint::Length(1), // hint
            ])
            .flex(Flex::Center)
            .split(content_area);

            let title = Line::from(vec![
                Span::raw(NOTICE_ICON),
                Span::raw(" "),
                Span::styled(notice.title(), Style::default().fg(accent).bold()),
            ])
            .centered();
            frame.render_widget(Paragraph::new(title), chunks[0]);

            frame.render_widget(
                Paragraph::new(Line::from(notice.message.clone()).centered())
                    .wrap(Wrap { trim: true }),
                chunks[2],
            );

            let hint = Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to continue", Style::default().fg(Color::DarkGray)),
            ])
            .centered();
            frame.render_widget(Paragraph::new(hint), chunks[3]);
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(35, 35, 45)),
                        padding: Padding::all(1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::NoticeDismiss,
                render_content: &mut render_content,
            },
        );
    }
}

/// One-line notice on the bottom row when the modal does not fit
fn render_compact(frame: &mut Frame, area: Rect, notice: &Notice, accent: Color) {
    if area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.bottom() - 1, area.width, 1);
    let line = Line::from(vec![
        Span::styled(format!("{}: ", notice.title()), Style::default().fg(accent).bold()),
        Span::raw(notice.message.clone()),
        Span::styled(" [Enter]", Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(Color::Rgb(35, 35, 45))),
        row,
    );
}
