//! Mapping from raw input events to controller intents.

use crate::domain::tool::Tool;
use crate::domain::types::{BrandName, ToolId};

/// Scroll geometry of the list container, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollPosition {
    /// Distance scrolled from the top.
    pub offset: u32,
    /// Visible height.
    pub viewport: u32,
    /// Full scrollable height.
    pub content: u32,
}

impl ScrollPosition {
    pub fn distance_to_bottom(&self) -> u32 {
        self.content
            .saturating_sub(self.offset.saturating_add(self.viewport))
    }

    pub fn is_near_bottom(&self, threshold: u32) -> bool {
        self.distance_to_bottom() <= threshold
    }
}

/// Raw events emitted by the list view.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Current value of the search box after a keystroke.
    SearchInput(String),
    /// Value of the brand select; empty for "all brands".
    BrandSelected(String),
    Scrolled(ScrollPosition),
    LoadMoreClicked,
    RetryClicked,
}

/// Everything the list controller can be asked to do.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    SetSearchText(String),
    SetBrandFilter(Option<BrandName>),
    LoadNextPage,
    Scrolled(ScrollPosition),
    Retry,
    Created(Tool),
    Updated(Tool),
    Removed(ToolId),
}

pub fn intent_for(event: InputEvent) -> Intent {
    match event {
        InputEvent::SearchInput(text) => Intent::SetSearchText(text),
        InputEvent::BrandSelected(value) => Intent::SetBrandFilter(BrandName::new(value).ok()),
        InputEvent::Scrolled(position) => Intent::Scrolled(position),
        InputEvent::LoadMoreClicked => Intent::LoadNextPage,
        InputEvent::RetryClicked => Intent::Retry,
    }
}
