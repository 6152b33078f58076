use serde::Serialize;

use super::color::Rgb;
use super::lifecycle::CountdownView;
use super::{CompletionOption, Lifecycle, Mode, TimePhase};

/// One tick as handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickView {
    pub index: usize,
    /// Clockwise degrees from the top
    pub angle: f64,
    pub filled: bool,
    pub current: bool,
    pub length: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub option: CompletionOption,
    pub label: &'static str,
    pub selected: bool,
}

/// Everything a renderer needs to draw one frame of the dial
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub lifecycle: Lifecycle,
    pub mode: Mode,
    pub time_phase: TimePhase,
    /// Temperature or time read-out for the centre of the dial
    pub primary: String,
    pub status: &'static str,
    /// False during the "off" half of the preheat label blink
    pub status_visible: bool,
    /// True while the boundary flash has the read-out dimmed
    pub flash_dimmed: bool,
    pub flash_active: bool,
    pub rapid: bool,
    pub total_ticks: usize,
    pub filled_count: usize,
    pub current_index: usize,
    pub ticks: Vec<TickView>,
    pub countdown: Option<CountdownView>,
    /// Completion choices, empty before the cycle completes
    pub options: Vec<OptionView>,
}

/// Status line for a lifecycle phase
pub fn status_text(lifecycle: Lifecycle, mode: Mode) -> &'static str {
    match (lifecycle, mode) {
        (Lifecycle::Setup, Mode::Temperature) => "Set temperature",
        (Lifecycle::Setup, Mode::Time) => "Set cook time",
        (Lifecycle::Starting, _) => "Starting…",
        (Lifecycle::Preheat, _) => "Preheating…",
        (Lifecycle::Cooking, _) => "Actively cooking",
        (Lifecycle::Complete, _) => "Cooking complete",
    }
}
