//! Scrollable pane for streamed build output.
//!
//! Lines arrive one at a time while cargo runs. The pane tails the output by
//! default; scrolling up pins the view until the user scrolls back to the
//! bottom.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Build output lines plus scroll state.
#[derive(Debug, Clone, Default)]
pub struct BuildLog {
    lines: Vec<String>,
    scroll_offset: usize,
    /// Follow new output. Cleared by scrolling up, restored at the bottom.
    follow: bool,
}

impl BuildLog {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            scroll_offset: 0,
            follow: true,
        }
    }

    pub fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll_offset = 0;
        self.follow = true;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Scroll up one line and stop following new output.
    pub fn scroll_up(&mut self) {
        self.follow = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down one line; at the bottom, resume following.
    pub fn scroll_down(&mut self, viewport: usize) {
        let max = self.max_offset(viewport);
        self.scroll_offset = (self.scroll_offset + 1).min(max);
        if self.scroll_offset == max {
            self.follow = true;
        }
    }

    pub fn page_up(&mut self, viewport: usize) {
        self.follow = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(viewport.max(1));
    }

    pub fn page_down(&mut self, viewport: usize) {
        let max = self.max_offset(viewport);
        self.scroll_offset = (self.scroll_offset + viewport.max(1)).min(max);
        if self.scroll_offset == max {
            self.follow = true;
        }
    }

    fn max_offset(&self, viewport: usize) -> usize {
        self.lines.len().saturating_sub(viewport.max(1))
    }

    /// Renders the pane with a scrollbar when the output overflows.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, title: &str) {
        let block = Block::default().borders(Borders::ALL).title(title.to_string());

        let viewport = area.height.saturating_sub(2) as usize;
        let max = self.max_offset(viewport);
        if self.follow {
            self.scroll_offset = max;
        } else {
            self.scroll_offset = self.scroll_offset.min(max);
        }

        let text = if self.lines.is_empty() {
            "Waiting for build output...".to_string()
        } else {
            self.lines.join("\n")
        };

        let paragraph = Paragraph::new(text)
            .block(block)
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, area);

        if self.lines.len() > viewport {
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(self.lines.len())
                .viewport_content_length(viewport)
                .position(self.scroll_offset);

            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }
}
