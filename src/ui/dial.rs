use ratatui::layout::{Alignment, Rect};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as Stroke};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use jogdial::{Lifecycle, RenderFrame};

use super::theme::{rgb, Theme};
use crate::app::App;

/// Radius where every tick starts, in canvas units
const INNER_RADIUS: f64 = 0.78;
/// Tick length at multiplier 1.0
const BASE_LENGTH: f64 = 0.08;
const OUTER_LIMIT: f64 = 1.0;

/// Render the ring of ticks with the readout in its centre
pub fn render(f: &mut Frame, app: &App, frame: &RenderFrame, area: Rect) {
    let ring = square(area);
    if ring.width < 4 || ring.height < 2 {
        return;
    }

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-OUTER_LIMIT, OUTER_LIMIT])
        .y_bounds([-OUTER_LIMIT, OUTER_LIMIT])
        .paint(|ctx| {
            for tick in &frame.ticks {
                let (x1, y1, x2, y2) = tick_segment(tick.angle, tick.length);
                ctx.draw(&Stroke {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: rgb(tick.color),
                });
            }
        });
    f.render_widget(canvas, ring);

    let lines = centre_lines(frame, &app.theme);
    let text_rect = centred(ring, &lines);
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        text_rect,
    );
}

/// Start and end of a radial tick; 0° is twelve o'clock, clockwise
pub fn tick_segment(angle_deg: f64, length: f64) -> (f64, f64, f64, f64) {
    let theta = angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    let outer = (INNER_RADIUS + BASE_LENGTH * length).min(OUTER_LIMIT);
    (
        INNER_RADIUS * sin,
        INNER_RADIUS * cos,
        outer * sin,
        outer * cos,
    )
}

fn centre_lines<'a>(frame: &'a RenderFrame, theme: &Theme) -> Vec<Line<'a>> {
    let primary_style = if frame.flash_dimmed {
        theme.readout_dimmed()
    } else {
        theme.readout()
    };
    let mut primary = vec![Span::styled(frame.primary.as_str(), primary_style)];
    if frame.rapid && frame.lifecycle == Lifecycle::Setup {
        primary.push(Span::styled(" »", theme.rapid()));
    }

    let mut lines = vec![Line::from(primary)];
    lines.push(if frame.status_visible {
        Line::from(Span::styled(frame.status, theme.status()))
    } else {
        Line::from("")
    });

    for option in &frame.options {
        let (marker, style) = if option.selected {
            ("› ", theme.option_selected())
        } else {
            ("  ", theme.option())
        };
        lines.push(Line::from(Span::styled(
            format!("{marker}{}", option.label),
            style,
        )));
    }
    lines
}

/// Largest area with a round-looking aspect (cells are about twice as tall as wide)
fn square(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn centred(ring: Rect, lines: &[Line]) -> Rect {
    let widest = lines
        .iter()
        .map(|l| {
            l.spans
                .iter()
                .map(|s| UnicodeWidthStr::width(s.content.as_ref()))
                .sum::<usize>()
        })
        .max()
        .unwrap_or(0) as u16;
    let width = widest.min(ring.width);
    let height = (lines.len() as u16).min(ring.height);
    Rect {
        x: ring.x + (ring.width - width) / 2,
        y: ring.y + (ring.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_tick_points_up() {
        let (x1, y1, x2, y2) = tick_segment(0.0, 1.0);
        assert!(x1.abs() < 1e-9 && x2.abs() < 1e-9);
        assert!(y2 > y1);
    }

    #[test]
    fn quarter_turn_points_right() {
        let (x1, _, x2, y2) = tick_segment(90.0, 1.0);
        assert!(x2 > x1);
        assert!(y2.abs() < 1e-9);
    }

    #[test]
    fn long_ticks_stay_inside_bounds() {
        let (_, _, _, y2) = tick_segment(0.0, 10.0);
        assert!(y2 <= OUTER_LIMIT);
    }

    #[test]
    fn square_is_centred_and_twice_as_wide() {
        let r = square(Rect::new(0, 0, 100, 20));
        assert_eq!((r.width, r.height), (40, 20));
        assert_eq!(r.x, 30);
    }
}
