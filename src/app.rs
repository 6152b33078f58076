use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use jogdial::config::KeysConfig;
use jogdial::{Action, Config, DialController, DialError, DialResult, InputOutcome, Lifecycle};

use crate::event::Event;
use crate::ui::theme::Theme;

// ── Key bindings ──────────────────────────────────────────────────────

/// What a key press means to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Dial(Action),
    Reset,
    Quit,
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, Command)>,
}

impl KeyBindings {
    pub fn from_config(keys: &KeysConfig) -> DialResult<Self> {
        let entries = [
            ("keys.rotate_left", &keys.rotate_left, Command::Dial(Action::RotateDecrease)),
            ("keys.rotate_right", &keys.rotate_right, Command::Dial(Action::RotateIncrease)),
            ("keys.press", &keys.press, Command::Dial(Action::Press)),
            ("keys.aux", &keys.aux, Command::Dial(Action::Aux)),
            ("keys.reset", &keys.reset, Command::Reset),
            ("keys.quit", &keys.quit, Command::Quit),
        ];
        let mut bindings = Vec::with_capacity(entries.len());
        for (field, name, command) in entries {
            let code = parse_key(name)
                .ok_or_else(|| DialError::config(field, format!("unknown key \"{name}\"")))?;
            bindings.push((code, command));
        }
        Ok(Self { bindings })
    }

    pub fn lookup(&self, key: &KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Quit);
        }
        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == code)
            .map(|(_, command)| *command)
    }
}

/// Parse a key name from the config file
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let name = name.trim().to_lowercase();
    match name.as_str() {
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "enter" | "return" => Some(KeyCode::Enter),
        "space" => Some(KeyCode::Char(' ')),
        "tab" => Some(KeyCode::Tab),
        "esc" | "escape" => Some(KeyCode::Esc),
        "backspace" => Some(KeyCode::Backspace),
        s if s.chars().count() == 1 => s.chars().next().map(KeyCode::Char),
        _ => None,
    }
}

// ── Application State ─────────────────────────────────────────────────

pub struct App {
    pub dial: DialController,
    pub theme: Theme,
    pub should_quit: bool,
    /// Something changed since the last draw
    pub dirty: bool,
    was_animating: bool,
    keys: KeyBindings,
    min_rotate_interval: Duration,
    last_rotate: Option<Instant>,
}

impl App {
    pub fn new(config: &Config) -> DialResult<Self> {
        Ok(Self {
            dial: DialController::new(config.clone())?,
            theme: Theme::from_config(&config.theme),
            should_quit: false,
            dirty: true,
            was_animating: false,
            keys: KeyBindings::from_config(&config.keys)?,
            min_rotate_interval: Duration::from_millis(config.input.min_interval_ms),
            last_rotate: None,
        })
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Frame => {
                // One extra draw after the last animation ends so it settles
                let animating = self.dial.has_active_animation();
                if animating || self.was_animating {
                    self.dirty = true;
                }
                self.was_animating = animating;
            }
            Event::Housekeeping => {
                if let Some(phase) = self.dial.tick(now) {
                    info!(%phase, "entered phase");
                    self.dirty = true;
                }
                // Countdown digits and the preheat label change without input
                if matches!(
                    self.dial.state().lifecycle(),
                    Lifecycle::Preheat | Lifecycle::Cooking
                ) {
                    self.dirty = true;
                }
            }
            Event::Resize(_, _) => self.dirty = true,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(command) = self.keys.lookup(&key) else {
            return;
        };
        match command {
            Command::Quit => self.should_quit = true,
            Command::Reset => {
                self.dial.reset();
                self.last_rotate = None;
                self.dirty = true;
            }
            Command::Dial(action) => {
                if action.direction().is_some() && self.rate_limited(now) {
                    debug!(?action, "rotate dropped by rate limit");
                    return;
                }
                let outcome = self.dial.handle(action, now);
                if outcome != InputOutcome::Ignored {
                    self.dirty = true;
                }
            }
        }
    }

    /// Host-side rotate rate limit; records the rotate when it is let through
    fn rate_limited(&mut self, now: Instant) -> bool {
        if self.min_rotate_interval.is_zero() {
            return false;
        }
        if let Some(last) = self.last_rotate {
            if now.saturating_duration_since(last) < self.min_rotate_interval {
                return true;
            }
        }
        self.last_rotate = Some(now);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn parses_named_and_single_char_keys() {
        assert_eq!(parse_key("Left"), Some(KeyCode::Left));
        assert_eq!(parse_key("space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("s"), Some(KeyCode::Char('s')));
        assert_eq!(parse_key("hyper"), None);
    }

    #[test]
    fn unknown_key_rejects_config() {
        let mut config = Config::default();
        config.keys.aux = "hyper".into();
        assert!(matches!(
            App::new(&config),
            Err(DialError::Config { field: "keys.aux", .. })
        ));
    }

    #[test]
    fn keys_drive_the_dial() {
        let t0 = Instant::now();
        let mut app = App::new(&Config::default()).unwrap();
        app.handle_key(key(KeyCode::Right), t0);
        assert_eq!(app.dial.state().value.temperature, 405);
        app.handle_key(key(KeyCode::Enter), t0);
        assert_eq!(app.dial.state().mode, jogdial::Mode::Time);
        app.handle_key(key(KeyCode::Char('S')), t0);
        assert_eq!(app.dial.state().lifecycle(), Lifecycle::Starting);
        app.handle_key(key(KeyCode::Char('r')), t0);
        assert_eq!(app.dial.state().lifecycle(), Lifecycle::Setup);
        app.handle_key(key(KeyCode::Char('q')), t0);
        assert!(app.should_quit);
    }

    #[test]
    fn rate_limit_drops_fast_rotates() {
        let t0 = Instant::now();
        let mut config = Config::default();
        config.input.min_interval_ms = 50;
        let mut app = App::new(&config).unwrap();
        app.handle_key(key(KeyCode::Right), t0);
        app.handle_key(key(KeyCode::Right), t0 + Duration::from_millis(20));
        assert_eq!(app.dial.state().value.temperature, 405);
        app.handle_key(key(KeyCode::Right), t0 + Duration::from_millis(60));
        assert_eq!(app.dial.state().value.temperature, 410);
    }

    #[test]
    fn housekeeping_advances_the_cycle() {
        let t0 = Instant::now();
        let mut app = App::new(&Config::default()).unwrap();
        app.handle_key(key(KeyCode::Char('s')), t0);
        app.dirty = false;
        app.handle_event(Event::Housekeeping, t0 + Duration::from_millis(800));
        assert_eq!(app.dial.state().lifecycle(), Lifecycle::Preheat);
        assert!(app.dirty);
    }
}
