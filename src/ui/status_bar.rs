use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use jogdial::config::KeysConfig;
use jogdial::Lifecycle;

use super::theme::Theme;
use crate::app::App;

/// Render the bottom status bar with phase-sensitive keybinding hints
pub fn render(frame: &mut Frame, app: &App, lifecycle: Lifecycle, area: Rect) {
    let keys = &app.dial.config().keys;
    let hints = match lifecycle {
        Lifecycle::Setup => setup_hints(keys),
        Lifecycle::Complete => complete_hints(keys),
        Lifecycle::Starting | Lifecycle::Preheat | Lifecycle::Cooking => busy_hints(keys),
    };

    let mut spans: Vec<Span> = Vec::with_capacity(hints.len() * 3);
    for (i, (k, d)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│", app.theme.separator()));
        }
        spans.push(Span::styled(format!(" {k} "), app.theme.key_hint()));
        spans.push(Span::styled(format!("{d} "), app.theme.key_desc()));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

fn setup_hints(keys: &KeysConfig) -> Vec<(String, &'static str)> {
    vec![
        (format!("{}/{}", keys.rotate_left, keys.rotate_right), "Adjust"),
        (keys.press.clone(), "Mode"),
        (keys.aux.clone(), "Start"),
        (keys.quit.clone(), "Quit"),
    ]
}

fn busy_hints(keys: &KeysConfig) -> Vec<(String, &'static str)> {
    vec![(keys.reset.clone(), "Reset"), (keys.quit.clone(), "Quit")]
}

fn complete_hints(keys: &KeysConfig) -> Vec<(String, &'static str)> {
    vec![
        (format!("{}/{}", keys.rotate_left, keys.rotate_right), "Option"),
        (keys.reset.clone(), "Reset"),
        (keys.quit.clone(), "Quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_hints_follow_key_config() {
        let mut keys = KeysConfig::default();
        keys.aux = "space".into();
        let hints = setup_hints(&keys);
        assert!(hints.contains(&("space".to_string(), "Start")));
        assert_eq!(hints[0].0, "left/right");
    }
}
