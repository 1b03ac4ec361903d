//! Scroll geometry for the sticky navbar and section links

/// Scroll depth after which the navbar gets its "scrolled" style
pub const NAVBAR_SCROLLED_THRESHOLD: f64 = 50.0;

/// Look-ahead applied to the scroll position when picking the active section
pub const ACTIVE_SECTION_OFFSET: f64 = 200.0;

/// Height of the fixed navbar, subtracted from smooth-scroll targets
pub const NAV_HEIGHT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLLED_THRESHOLD
}

/// Section to highlight for the current scroll position
///
/// When sections overlap, the last matching one wins.
pub fn active_section(scroll_y: f64, sections: &[Section]) -> Option<&Section> {
    let position = scroll_y + ACTIVE_SECTION_OFFSET;
    sections.iter().rev().find(|s| s.contains(position))
}

/// Scroll destination for an in-page anchor like `#services`
///
/// A bare `#` or an unknown id yields `None` (the default link behavior applies).
pub fn scroll_target(href: &str, sections: &[Section]) -> Option<f64> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    sections
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.top - NAV_HEIGHT)
}

/// Page read progress in percent
pub fn scroll_progress(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}
