// ── Child-control layout ──────────────────────────────────────────────────────
//
// The client area is a fixed-height top band (status label and the command
// buttons' starting row) above two equal-height panes: rich text on top,
// plain text below, both spanning the full client width.

use serde::Deserialize;

/// Reference DPI at which all logical pixel values are defined.
pub(crate) const BASE_DPI: u32 = 96;

/// A client-area rectangle in device pixels, as passed to `SetWindowPos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub(crate) struct Rect {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl Rect {
    pub(crate) const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the last row covered by this rectangle.
    #[cfg(test)]
    pub(crate) fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Client-area dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Size {
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl Size {
    pub(crate) const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Fixed geometry of the inspector window, in logical pixels.
///
/// Every field can be overridden from `inspector.json`; missing fields keep
/// their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct LayoutMetrics {
    /// Nominal outer window width before DPI scaling.
    pub(crate) window_width: i32,
    /// Nominal outer window height before DPI scaling.
    pub(crate) window_height: i32,
    /// Height of the top band reserved for the status label.
    pub(crate) status_band: i32,
    /// Where the status label is created.  It is not moved on resize.
    pub(crate) status_label: Rect,
    pub(crate) button_x: i32,
    /// Top of the first command button.
    pub(crate) button_first_y: i32,
    pub(crate) button_width: i32,
    pub(crate) button_height: i32,
    /// Vertical distance between consecutive buttons.
    pub(crate) button_step: i32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 800,
            status_band: 46,
            status_label: Rect::new(10, 10, 460, 30),
            button_x: 10,
            button_first_y: 50,
            button_width: 200,
            button_height: 30,
            button_step: 50,
        }
    }
}

/// The two resizable panes after a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PaneLayout {
    pub(crate) rich_text: Rect,
    pub(crate) plain_text: Rect,
}

/// Split `client` into the rich-text and plain-text panes.
///
/// The height left under the status band is halved with integer division, so
/// an odd remainder leaves the last pixel row uncovered.  A client area
/// shorter than the band yields two zero-height panes.
pub(crate) fn compute(client: Size, metrics: &LayoutMetrics) -> PaneLayout {
    let band = metrics.status_band;
    let width = client.width.max(0);
    let half = (client.height - band).max(0) / 2;

    PaneLayout {
        rich_text: Rect::new(0, band, width, half),
        plain_text: Rect::new(0, band + half, width, half),
    }
}

/// Rectangle of the `slot`-th registered command button (0-based).
pub(crate) fn button_rect(metrics: &LayoutMetrics, slot: usize) -> Rect {
    let slot = i32::try_from(slot).unwrap_or(i32::MAX);
    Rect::new(
        metrics.button_x,
        metrics
            .button_first_y
            .saturating_add(metrics.button_step.saturating_mul(slot)),
        metrics.button_width,
        metrics.button_height,
    )
}

/// Scale a pixel value defined at 96 DPI to `dpi`, rounding to nearest
/// (the same result as `MulDiv(px, dpi, 96)`).
pub(crate) fn scale_for_dpi(px: i32, dpi: u32) -> i32 {
    let scaled = (i64::from(px) * i64::from(dpi) * 2 + i64::from(BASE_DPI)) / (2 * i64::from(BASE_DPI));
    i32::try_from(scaled).unwrap_or(i32::MAX)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panes_split_remaining_height_evenly() {
        let m = LayoutMetrics::default();
        let layout = compute(Size::new(784, 746), &m);
        assert_eq!(layout.rich_text, Rect::new(0, 46, 784, 350));
        assert_eq!(layout.plain_text, Rect::new(0, 396, 784, 350));
        assert_eq!(layout.plain_text.bottom(), 746);
    }

    #[test]
    fn plain_pane_starts_where_rich_pane_ends() {
        let m = LayoutMetrics::default();
        for h in [47, 100, 333, 1080] {
            let layout = compute(Size::new(640, h), &m);
            assert_eq!(layout.plain_text.y, layout.rich_text.bottom());
            assert_eq!(layout.rich_text.height, layout.plain_text.height);
            assert_eq!(layout.rich_text.width, 640);
        }
    }

    #[test]
    fn odd_remainder_leaves_one_row_uncovered() {
        let m = LayoutMetrics::default();
        let layout = compute(Size::new(300, 46 + 101), &m);
        assert_eq!(layout.rich_text.height, 50);
        assert_eq!(layout.plain_text.bottom(), 46 + 100);
    }

    #[test]
    fn client_shorter_than_band_gives_empty_panes() {
        let m = LayoutMetrics::default();
        let layout = compute(Size::new(200, 20), &m);
        assert_eq!(layout.rich_text.height, 0);
        assert_eq!(layout.plain_text.height, 0);
        assert_eq!(layout.rich_text.y, 46);
    }

    #[test]
    fn repeated_layout_is_identical() {
        let m = LayoutMetrics::default();
        let first = compute(Size::new(1024, 768), &m);
        let second = compute(Size::new(1024, 768), &m);
        assert_eq!(first, second);
    }

    #[test]
    fn buttons_stack_downwards() {
        let m = LayoutMetrics::default();
        assert_eq!(button_rect(&m, 0), Rect::new(10, 50, 200, 30));
        assert_eq!(button_rect(&m, 1), Rect::new(10, 100, 200, 30));
        assert_eq!(button_rect(&m, 4), Rect::new(10, 250, 200, 30));
    }

    #[test]
    fn dpi_scaling_matches_muldiv() {
        assert_eq!(scale_for_dpi(800, 96), 800);
        assert_eq!(scale_for_dpi(800, 144), 1200);
        assert_eq!(scale_for_dpi(800, 120), 1000);
        // 46 * 168 / 96 = 80.5 rounds up like MulDiv
        assert_eq!(scale_for_dpi(46, 168), 81);
    }

    #[test]
    fn partial_metrics_keep_defaults() {
        let m: LayoutMetrics = serde_json::from_str(r#"{"status_band":60}"#).expect("parse");
        assert_eq!(m.status_band, 60);
        assert_eq!(m.window_width, 800);
        assert_eq!(m.button_step, 50);
    }
}
