//! What the host renders, and the geometry it reports back.

use crate::suggestion::SuggestionKind;

/// Snapshot of everything a presentation layer needs to draw the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    pub input: &'a str,
    pub loading: bool,
    pub expanded: bool,
    /// The query qualifies and there is at least one result to show
    pub expandable: bool,
    /// Error lines to show right now (hidden while loading or below the threshold)
    pub errors: &'a [String],
    pub body: Body<'a>,
}

/// Main area under the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<'a> {
    /// Query too short, tell the user how many characters are needed
    Hint { min_chars: usize },
    /// Search finished without a single result
    NoResults,
    Suggestions(Vec<ItemView<'a>>),
    /// Loading, or the list is collapsed
    Hidden,
}

/// Shown when a finished search came back empty
pub const NO_RESULTS: &str = "¯\\_(ツ)_/¯ No results";

/// Text shown while the query is below the minimum length
pub fn hint_text(min_chars: usize) -> String {
    format!("Type at least {min_chars} chars to get suggestions")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemView<'a> {
    pub label: &'a str,
    pub kind: SuggestionKind,
    pub focused: bool,
}

/// Rectangle in host coordinates (terminal cells, pixels, ...)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x
            && row >= self.y
            && (col as u32) < self.x as u32 + self.width as u32
            && (row as u32) < self.y as u32 + self.height as u32
    }
}

/// The widget's footprint: its container plus the (optional) list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetBounds {
    pub container: Region,
    pub list: Option<Region>,
}

impl WidgetBounds {
    /// Whether a pointer event at (`col`, `row`) happened inside the widget
    pub fn contains(&self, col: u16, row: u16) -> bool {
        self.container.contains(col, row) || self.list.is_some_and(|r| r.contains(col, row))
    }
}

/// Visible window over a scrolled list of equally tall rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First visible row
    pub offset: usize,
    /// Number of visible rows
    pub height: usize,
}

impl Viewport {
    pub fn new(offset: usize, height: usize) -> Self {
        Self { offset, height }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        index >= self.offset && index < self.offset + self.height
    }

    /// Scroll the least amount needed to show `index`.
    ///
    /// Returns false (and leaves the offset alone) when `index` is already
    /// fully visible.
    pub fn reveal(&mut self, index: usize) -> bool {
        if self.height == 0 || self.is_visible(index) {
            return false;
        }
        if index < self.offset {
            self.offset = index;
        } else {
            self.offset = index + 1 - self.height;
        }
        true
    }
}
