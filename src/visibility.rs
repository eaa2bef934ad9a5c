//! Vertical visibility tests against the scroll viewport.
//!
//! Visibility is vertical-only: an element counts as in view based on its
//! top/bottom document offsets alone, matching typical vertical-scroll
//! pages. Horizontal position is never consulted.

/// An element's vertical extent in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Distance from the document top to the element's top edge
    pub top: f64,
    /// Distance from the document top to the element's bottom edge
    pub bottom: f64,
}

impl Bounds {
    /// Create bounds from a top offset and a height.
    pub fn with_height(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }
}

/// The currently visible vertical slice of the document.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Scroll offset of the viewport's top edge
    pub top: f64,
    /// Scroll offset of the viewport's bottom edge
    pub bottom: f64,
}

impl Viewport {
    /// Create a viewport from a scroll offset and a window height.
    pub fn with_height(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    /// The element's entire vertical extent lies strictly inside the viewport.
    #[inline]
    pub fn contains(&self, bounds: Bounds) -> bool {
        self.top < bounds.top && self.bottom > bounds.bottom
    }

    /// Conservative partial-overlap test: the element's bottom is above the
    /// viewport's bottom and its top below the viewport's top.
    #[inline]
    pub fn overlaps(&self, bounds: Bounds) -> bool {
        bounds.bottom <= self.bottom && bounds.top >= self.top
    }
}

/// Test whether an element is in view.
///
/// When `entire` is true the whole element must fit inside the viewport;
/// otherwise the partial-overlap test is used.
#[inline]
pub fn is_in_view(bounds: Bounds, viewport: Viewport, entire: bool) -> bool {
    if entire {
        viewport.contains(bounds)
    } else {
        viewport.overlaps(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_contained() {
        let viewport = Viewport::with_height(100.0, 600.0);
        let bounds = Bounds::with_height(300.0, 50.0);
        assert!(is_in_view(bounds, viewport, true));
        assert!(is_in_view(bounds, viewport, false));
    }

    #[test]
    fn test_one_pixel_below_viewport() {
        let viewport = Viewport::with_height(0.0, 600.0);
        let inside = Bounds::with_height(500.0, 99.0);
        assert!(is_in_view(inside, viewport, true));

        // One pixel lower puts the bottom edge flush with the viewport
        // bottom, which the strict check rejects
        let flush = Bounds::with_height(501.0, 99.0);
        assert!(!is_in_view(flush, viewport, true));
    }

    #[test]
    fn test_element_above_viewport() {
        let viewport = Viewport::with_height(1000.0, 600.0);
        let above = Bounds::with_height(100.0, 50.0);
        assert!(!is_in_view(above, viewport, true));
        assert!(!is_in_view(above, viewport, false));
    }

    #[test]
    fn test_entire_requires_strict_containment() {
        let viewport = Viewport::with_height(0.0, 600.0);
        // Top edge flush with the viewport top fails the strict check
        let flush = Bounds::with_height(0.0, 100.0);
        assert!(!viewport.contains(flush));
        assert!(viewport.overlaps(flush));
    }

    #[test]
    fn test_partial_overlap_is_conservative() {
        let viewport = Viewport::with_height(0.0, 600.0);
        // Element straddling the viewport bottom fails both modes
        let straddling = Bounds::with_height(550.0, 100.0);
        assert!(!viewport.contains(straddling));
        assert!(!viewport.overlaps(straddling));
    }
}
