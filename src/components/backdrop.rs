use artbox::LinearGradient;
use ratatui::{Frame, layout::Rect, style::Color};

use super::Component;
use crate::action::Action;
use crate::theme::{Gradient, Rgb};

/// Full-area background painted with the theme gradient.
pub struct Backdrop;

pub struct BackdropProps {
    pub gradient: Gradient,
    /// Horizontal drift in `0.0..1.0`
    pub phase: f32,
}

/// Color of column `x` out of `width` at the given phase.
pub fn column_color(gradient: &LinearGradient, x: u16, width: u16, phase: f32) -> Rgb {
    let width = f32::from(width.max(1));
    let pos = (f32::from(x) / width + phase).rem_euclid(1.0);
    gradient.color_at(pos)
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

impl Component<Action> for Backdrop {
    type Props<'a> = BackdropProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let gradient = props.gradient.stops();
        let buf = frame.buffer_mut();
        for x in area.left()..area.right() {
            let color = to_color(column_color(
                &gradient,
                x - area.left(),
                area.width,
                props.phase,
            ));
            for y in area.top()..area.bottom() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    // Stops past the first go through HSL, which can move a channel by one
    fn assert_close(actual: Rgb, expected: Rgb) {
        let near = |a: u8, b: u8| a.abs_diff(b) <= 1;
        assert!(
            near(actual.r, expected.r) && near(actual.g, expected.g) && near(actual.b, expected.b),
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn test_column_color_spans_stops() {
        let gradient = Gradient::Hot.stops();
        let (start, end) = Gradient::Hot.colors();
        assert_eq!(column_color(&gradient, 0, 10, 0.0), start);
        assert_close(column_color(&gradient, 5, 10, 0.0), end);
    }

    #[test]
    fn test_phase_shifts_columns() {
        let gradient = Gradient::Cold.stops();
        let (start, end) = Gradient::Cold.colors();
        assert_close(column_color(&gradient, 0, 10, 0.5), end);
        assert_eq!(column_color(&gradient, 5, 10, 0.5), start);
    }

    #[test]
    fn test_full_phase_is_no_shift() {
        let gradient = Gradient::Mild.stops();
        for x in 0..8 {
            assert_eq!(
                column_color(&gradient, x, 8, 1.0),
                column_color(&gradient, x, 8, 0.0)
            );
        }
    }

    #[test]
    fn test_render_paints_background() {
        let mut render = RenderHarness::new(10, 2);
        let mut backdrop = Backdrop;
        let (start, _) = Gradient::Fallback.colors();

        let buffer = render.render(|frame| {
            backdrop.render(
                frame,
                frame.area(),
                BackdropProps {
                    gradient: Gradient::Fallback,
                    phase: 0.0,
                },
            );
        });

        let cell = &buffer[(0, 1)];
        assert_eq!(cell.bg, Color::Rgb(start.r, start.g, start.b));
    }
}
