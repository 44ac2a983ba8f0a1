//! Tone-specific class and colour helpers shared by pages and components.

use crate::domain::TradeFlow;

/// Colour family of a panel: exports are blue, imports green, freight amber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Export,
    Import,
    Freight,
    Neutral,
}

impl From<TradeFlow> for Tone {
    fn from(flow: TradeFlow) -> Self {
        match flow {
            TradeFlow::Export => Tone::Export,
            TradeFlow::Import => Tone::Import,
        }
    }
}

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Export => "tone-export",
        Tone::Import => "tone-import",
        Tone::Freight => "tone-freight",
        Tone::Neutral => "tone-neutral",
    }
}

// ============================================
// BUTTON STYLES
// ============================================

pub fn btn_primary(tone: Tone) -> String {
    format!("btn btn-primary {}", tone_class(tone))
}

pub fn btn_toggle(tone: Tone, active: bool) -> String {
    if active {
        format!("btn active {}", tone_class(tone))
    } else {
        format!("btn {}", tone_class(tone))
    }
}

pub fn btn_ghost() -> &'static str {
    "btn"
}

// ============================================
// PANEL / TEXT STYLES
// ============================================

pub fn panel(tone: Tone) -> String {
    format!("panel {}", tone_class(tone))
}

pub fn input_class() -> &'static str {
    "input"
}

// ============================================
// CHART COLOURS
// ============================================

/// Fill used for bars and the primary line of a tone.
pub fn accent_color(tone: Tone) -> &'static str {
    match tone {
        Tone::Export => "#3b82f6",
        Tone::Import => "#22c55e",
        Tone::Freight => "#f59e0b",
        Tone::Neutral => "#818cf8",
    }
}

/// Line colours cycled through when a freight file has several routes.
const SERIES_PALETTE: [&str; 8] = [
    "#f59e0b", "#38bdf8", "#a78bfa", "#f472b6", "#34d399", "#f87171", "#facc15", "#94a3b8",
];

pub fn series_color(index: usize) -> &'static str {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_marks_active_state() {
        assert_eq!(btn_toggle(Tone::Export, true), "btn active tone-export");
        assert_eq!(btn_toggle(Tone::Import, false), "btn tone-import");
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(series_color(0), series_color(SERIES_PALETTE.len()));
        assert_eq!(Tone::from(TradeFlow::Import), Tone::Import);
    }
}
