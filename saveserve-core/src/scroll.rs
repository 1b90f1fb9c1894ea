//! Scroll-driven progress indicator (the delivery truck along the footer).

/// Horizontal space kept free for the destination icon at the end of the track.
pub const DESTINATION_RESERVE: f64 = 50.0;

/// Scroll offset after which the navigation header condenses.
pub const HEADER_CONDENSE_AT: f64 = 50.0;

/// Fraction of the page scrolled, clamped to `[0, 1]`.
///
/// A page with no scrollable overflow reads as 0, as does any non-finite input.
pub fn scroll_fraction(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let max_scroll = document_height - viewport_height;
    if !max_scroll.is_finite() || max_scroll <= 0.0 || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / max_scroll).clamp(0.0, 1.0)
}

/// Whether the header should use its condensed style.
pub fn header_condensed(scroll_top: f64) -> bool {
    scroll_top > HEADER_CONDENSE_AT
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl Viewport {
    pub fn new(scroll_top: f64, document_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            document_height,
            viewport_height,
        }
    }

    pub fn fraction(&self) -> f64 {
        scroll_fraction(self.scroll_top, self.document_height, self.viewport_height)
    }
}

/// Tracks the marker position across scroll events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTracker {
    fraction: f64,
    condensed: bool,
}

impl ScrollTracker {
    /// Computes the initial position so the marker is placed before any scrolling.
    pub fn mount(viewport: Viewport) -> Self {
        let mut tracker = Self {
            fraction: 0.0,
            condensed: false,
        };
        tracker.on_scroll(viewport);
        tracker
    }

    pub fn on_scroll(&mut self, viewport: Viewport) -> f64 {
        self.fraction = viewport.fraction();
        self.condensed = header_condensed(viewport.scroll_top);
        self.fraction
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn header_condensed(&self) -> bool {
        self.condensed
    }

    /// Left offset of the marker on a track `track_width` pixels wide.
    pub fn marker_offset(&self, track_width: f64) -> f64 {
        self.fraction * (track_width - DESTINATION_RESERVE).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_down() {
        assert_eq!(scroll_fraction(500.0, 2000.0, 1000.0), 0.5);
    }

    #[test]
    fn no_overflow_is_zero() {
        assert_eq!(scroll_fraction(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_fraction(120.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(scroll_fraction(-40.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(5000.0, 2000.0, 1000.0), 1.0);
        assert_eq!(scroll_fraction(f64::NAN, 2000.0, 1000.0), 0.0);
    }

    #[test]
    fn tracker_places_marker_at_mount() {
        let tracker = ScrollTracker::mount(Viewport::new(1000.0, 2000.0, 1000.0));
        assert_eq!(tracker.fraction(), 1.0);
        assert_eq!(tracker.marker_offset(1050.0), 1000.0);
        assert!(tracker.header_condensed());
    }

    #[test]
    fn tracker_follows_scroll_events() {
        let mut tracker = ScrollTracker::mount(Viewport::new(0.0, 3000.0, 1000.0));
        assert_eq!(tracker.fraction(), 0.0);
        assert!(!tracker.header_condensed());

        tracker.on_scroll(Viewport::new(500.0, 3000.0, 1000.0));
        assert_eq!(tracker.fraction(), 0.25);
        assert_eq!(tracker.marker_offset(30.0), 0.0);
    }
}
