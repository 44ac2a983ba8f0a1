//! Geometry for the SVG bar and line charts.
//!
//! Everything here is pure so the scaling can be tested without a renderer.

pub const CHART_WIDTH: f64 = 800.0;
pub const CHART_HEIGHT: f64 = 320.0;

/// Space reserved for axis labels around the plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const MARGINS: Margins = Margins {
    top: 16.0,
    right: 16.0,
    bottom: 96.0,
    left: 72.0,
};

pub fn plot_width() -> f64 {
    CHART_WIDTH - MARGINS.left - MARGINS.right
}

pub fn plot_height() -> f64 {
    CHART_HEIGHT - MARGINS.top - MARGINS.bottom
}

/// Maps a data range onto the plot's vertical extent (SVG y grows downwards).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YScale {
    pub min: f64,
    pub max: f64,
}

impl YScale {
    /// Bars always start from zero; lines use the data range.
    pub fn from_values(values: impl IntoIterator<Item = f64>, include_zero: bool) -> Self {
        let (mut min, mut max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }
        if include_zero {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        if (max - min).abs() < f64::EPSILON {
            max = min + 1.0;
        }
        Self { min, max }
    }

    pub fn y(&self, value: f64) -> f64 {
        let ratio = (value - self.min) / (self.max - self.min);
        MARGINS.top + plot_height() * (1.0 - ratio)
    }

    /// Evenly spaced tick values from min to max inclusive.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.min];
        }
        let step = (self.max - self.min) / (count - 1) as f64;
        (0..count).map(|idx| self.min + step * idx as f64).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn layout_bars(points: &[(String, f64)]) -> (Vec<Bar>, YScale) {
    let scale = YScale::from_values(points.iter().map(|(_, v)| *v), true);
    if points.is_empty() {
        return (Vec::new(), scale);
    }
    let slot = plot_width() / points.len() as f64;
    let width = (slot * 0.7).max(1.0);
    let baseline = scale.y(0.0);
    let bars = points
        .iter()
        .enumerate()
        .map(|(idx, (label, value))| {
            let top = scale.y(*value);
            Bar {
                label: label.clone(),
                value: *value,
                x: MARGINS.left + slot * idx as f64 + (slot - width) / 2.0,
                y: top.min(baseline),
                width,
                height: (baseline - top).abs(),
            }
        })
        .collect();
    (bars, scale)
}

/// X position of the i-th of `count` evenly spaced points.
pub fn point_x(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return MARGINS.left + plot_width() / 2.0;
    }
    MARGINS.left + plot_width() * index as f64 / (count - 1) as f64
}

/// SVG `points` strings for a series; gaps split the line into segments.
pub fn polyline_segments(values: &[Option<f64>], scale: &YScale) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for (idx, value) in values.iter().enumerate() {
        match value.filter(|v| v.is_finite()) {
            Some(v) => current.push(format!("{:.1},{:.1}", point_x(idx, values.len()), scale.y(v))),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current).join(" ")),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current.join(" "));
    }
    segments
}

/// Indices whose x labels are drawn, keeping at most `max_labels`.
pub fn label_indices(count: usize, max_labels: usize) -> Vec<usize> {
    if count == 0 || max_labels == 0 {
        return Vec::new();
    }
    let step = count.div_ceil(max_labels).max(1);
    (0..count).step_by(step).collect()
}

/// A labelled horizontal grid line.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub y: String,
    pub text: String,
}

/// Axis positions and y ticks shared by both chart kinds, preformatted for SVG.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub view_box: String,
    pub left: String,
    pub right: String,
    pub top: String,
    pub bottom: String,
    pub tick_x: String,
    pub y_title_transform: String,
    pub ticks: Vec<Tick>,
}

impl Frame {
    pub fn new(scale: &YScale) -> Self {
        let bottom = MARGINS.top + plot_height();
        Self {
            view_box: format!("0 0 {CHART_WIDTH} {CHART_HEIGHT}"),
            left: format!("{:.1}", MARGINS.left),
            right: format!("{:.1}", MARGINS.left + plot_width()),
            top: format!("{:.1}", MARGINS.top),
            bottom: format!("{bottom:.1}"),
            tick_x: format!("{:.1}", MARGINS.left - 8.0),
            y_title_transform: format!(
                "translate(14, {:.1}) rotate(-90)",
                MARGINS.top + plot_height() / 2.0
            ),
            ticks: scale
                .ticks(5)
                .into_iter()
                .map(|value| Tick {
                    y: format!("{:.1}", scale.y(value)),
                    text: short_number(value),
                })
                .collect(),
        }
    }
}

/// Rotated label hanging below the x axis at `x`.
pub fn x_label_transform(x: f64) -> String {
    format!(
        "translate({x:.1}, {:.1}) rotate(45)",
        MARGINS.top + plot_height() + 8.0
    )
}

/// Compact axis label: 12_345_678 -> "12.3M".
pub fn short_number(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}k", value / 1e3)
    } else if abs >= 10.0 || abs == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallest_bar_reaches_the_top() {
        let points = vec![("A".to_string(), 200.0), ("B".to_string(), 50.0)];
        let (bars, scale) = layout_bars(&points);
        assert_eq!(scale.min, 0.0);
        assert!((bars[0].y - MARGINS.top).abs() < 1e-9);
        assert!((bars[0].height - plot_height()).abs() < 1e-9);
        assert!((bars[1].height - plot_height() / 4.0).abs() < 1e-9);
        assert!(bars[0].x < bars[1].x);
    }

    #[test]
    fn empty_and_flat_data_do_not_divide_by_zero() {
        let (bars, scale) = layout_bars(&[]);
        assert!(bars.is_empty());
        assert_eq!(scale, YScale { min: 0.0, max: 1.0 });

        let flat = YScale::from_values([5.0, 5.0], false);
        assert_eq!(flat, YScale { min: 5.0, max: 6.0 });
    }

    #[test]
    fn gaps_split_polylines() {
        let scale = YScale::from_values([1.0, 3.0], false);
        let segments = polyline_segments(&[Some(1.0), Some(2.0), None, Some(3.0)], &scale);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].split(' ').count(), 2);
        assert!(polyline_segments(&[None, None], &scale).is_empty());
    }

    #[test]
    fn ticks_span_the_range() {
        let scale = YScale { min: 0.0, max: 100.0 };
        assert_eq!(scale.ticks(5), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn label_indices_thin_out_long_axes() {
        assert_eq!(label_indices(5, 10), vec![0, 1, 2, 3, 4]);
        assert_eq!(label_indices(66, 12), (0..66).step_by(6).collect::<Vec<_>>());
        assert!(label_indices(0, 12).is_empty());
    }

    #[test]
    fn frame_ticks_run_bottom_to_top() {
        let frame = Frame::new(&YScale { min: 0.0, max: 100.0 });
        assert_eq!(frame.ticks.len(), 5);
        assert_eq!(frame.ticks[0].text, "0");
        assert_eq!(frame.ticks[0].y, frame.bottom);
        assert_eq!(frame.ticks[4].y, frame.top);
        assert_eq!(frame.view_box, "0 0 800 320");
    }

    #[test]
    fn short_numbers() {
        assert_eq!(short_number(0.0), "0");
        assert_eq!(short_number(1_500.0), "1.5k");
        assert_eq!(short_number(12_345_678.0), "12.3M");
        assert_eq!(short_number(0.5), "0.50");
    }
}
