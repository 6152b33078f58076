use std::time::{Duration, Instant};

use color_eyre::eyre::{Result, WrapErr};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use jogdial::{Action, Config, DialController, RenderFrame};

/// Longest single `wait`: the longest cook plus preheat fits well inside
pub const MAX_WAIT: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// One line of the headless command stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Dial(Action),
    Reset,
    Wait(Duration),
    Frame,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = match words.next()? {
        "left" => Command::Dial(Action::RotateDecrease),
        "right" => Command::Dial(Action::RotateIncrease),
        "press" => Command::Dial(Action::Press),
        "aux" => Command::Dial(Action::Aux),
        "reset" => Command::Reset,
        "frame" => Command::Frame,
        "wait" => {
            let wait = Duration::from_millis(words.next()?.parse().ok()?);
            if wait > MAX_WAIT {
                return None;
            }
            Command::Wait(wait)
        }
        _ => return None,
    };
    match words.next() {
        Some(_) => None,
        None => Some(command),
    }
}

/// A dial on a simulated clock: time only moves on `wait`
pub struct Session {
    dial: DialController,
    base: Instant,
    elapsed: Duration,
    housekeeping: Duration,
}

impl Session {
    pub fn new(config: Config, base: Instant) -> jogdial::DialResult<Self> {
        let housekeeping = config.housekeeping_interval().max(Duration::from_millis(1));
        Ok(Self {
            dial: DialController::new(config)?,
            base,
            elapsed: Duration::ZERO,
            housekeeping,
        })
    }

    pub fn now(&self) -> Instant {
        self.base + self.elapsed
    }

    /// Apply one command; `frame` yields the current render output
    pub fn apply(&mut self, command: Command) -> Option<RenderFrame> {
        match command {
            Command::Dial(action) => {
                let outcome = self.dial.handle(action, self.now());
                debug!(?action, ?outcome, "headless input");
                None
            }
            Command::Reset => {
                self.dial.reset();
                None
            }
            Command::Wait(duration) => {
                // Housekeeping cadence, so phase changes land where the live loop puts them
                let target = self.elapsed + duration;
                if self.base.checked_add(target).is_none() {
                    warn!(?duration, "wait runs past the simulated clock, ignored");
                    return None;
                }
                while self.elapsed < target {
                    self.elapsed = (self.elapsed + self.housekeeping).min(target);
                    if let Some(phase) = self.dial.tick(self.now()) {
                        info!(%phase, "entered phase");
                    }
                }
                None
            }
            Command::Frame => Some(self.dial.frame(self.now())),
        }
    }
}

/// Read commands from stdin, write JSON frames to stdout
pub async fn run(config: Config) -> Result<()> {
    let mut session = Session::new(config, Instant::now())?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.wrap_err("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(command) = parse_command(line) else {
            warn!(line, "unknown headless command");
            eprintln!("unknown command: {line}");
            continue;
        };
        if let Some(frame) = session.apply(command) {
            let mut json = serde_json::to_string(&frame).wrap_err("Failed to encode frame")?;
            json.push('\n');
            stdout.write_all(json.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
