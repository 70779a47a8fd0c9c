use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::dashboard::event::Event;
use crate::dashboard::theme::Theme;
use crate::query::{
    author_options, query_with_limits, tag_options, FilterSpec, QueryLimits, QueryResult, ALL,
};
use crate::record::QuoteRecord;

/// Which input receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Author,
    Tag,
    Quotes,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Author,
            Focus::Author => Focus::Tag,
            Focus::Tag => Focus::Quotes,
            Focus::Quotes => Focus::Search,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Search => Focus::Quotes,
            Focus::Author => Focus::Search,
            Focus::Tag => Focus::Author,
            Focus::Quotes => Focus::Tag,
        }
    }
}

/// Dashboard state
///
/// Holds the immutable collection and the current filter inputs. Every
/// filter change recomputes `result` from scratch.
pub struct App {
    records: Vec<QuoteRecord>,
    limits: QueryLimits,
    /// Author selector entries, "all" first
    pub author_choices: Vec<String>,
    /// Tag selector entries, "all" first
    pub tag_choices: Vec<String>,
    pub author_index: usize,
    pub tag_index: usize,
    /// Current search text
    pub search: String,
    /// Cursor position in the search field, in characters
    pub cursor_position: usize,
    pub focus: Focus,
    pub theme: Theme,
    /// Output of the last query
    pub result: QueryResult,
    /// First visible line of the quote cards
    pub scroll_position: usize,
    /// Quote cards show the author biography
    pub show_details: bool,
    pub should_quit: bool,
}

impl App {
    /// Create the dashboard state for a loaded collection
    pub fn new(records: Vec<QuoteRecord>, limits: QueryLimits) -> Self {
        let author_choices = with_all(author_options(&records));
        let tag_choices = with_all(tag_options(&records));

        let mut app = Self {
            records,
            limits,
            author_choices,
            tag_choices,
            author_index: 0,
            tag_index: 0,
            search: String::new(),
            cursor_position: 0,
            focus: Focus::Search,
            theme: Theme::default(),
            result: QueryResult::default(),
            scroll_position: 0,
            show_details: false,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Size of the whole collection
    pub fn collection_len(&self) -> usize {
        self.records.len()
    }

    pub fn selected_author(&self) -> &str {
        self.author_choices
            .get(self.author_index)
            .map(String::as_str)
            .unwrap_or(ALL)
    }

    pub fn selected_tag(&self) -> &str {
        self.tag_choices
            .get(self.tag_index)
            .map(String::as_str)
            .unwrap_or(ALL)
    }

    /// The filter described by the current inputs
    pub fn filter(&self) -> FilterSpec {
        FilterSpec::new(
            Some(self.search.as_str()),
            Some(self.selected_author()),
            Some(self.selected_tag()),
        )
    }

    /// Recompute the query result and reset the quote scroll
    pub fn refresh(&mut self) {
        self.result = query_with_limits(&self.records, &self.filter(), self.limits);
        self.scroll_position = 0;
    }

    /// Apply one dashboard event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Scroll(delta) => self.scroll_by(delta),
            Event::Resize => {}
        }
    }

    /// Handle key events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('t') if ctrl => self.theme = self.theme.toggled(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::PageUp => self.scroll_by(-10),
            KeyCode::PageDown => self.scroll_by(10),
            _ => match self.focus {
                Focus::Search => self.handle_search_key(key),
                Focus::Author => {
                    if let Some(delta) = cycle_delta(key.code) {
                        self.cycle_author(delta);
                    }
                }
                Focus::Tag => {
                    if let Some(delta) = cycle_delta(key.code) {
                        self.cycle_tag(delta);
                    }
                }
                Focus::Quotes => match key.code {
                    KeyCode::Up => self.scroll_by(-1),
                    KeyCode::Down => self.scroll_by(1),
                    KeyCode::Home => self.scroll_position = 0,
                    KeyCode::Enter => self.toggle_details(),
                    _ => {}
                },
            },
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete_char(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.search.chars().count(),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            _ => {}
        }
    }

    /// Byte offset of the cursor in `search`
    pub fn cursor_byte_index(&self) -> usize {
        self.search
            .char_indices()
            .nth(self.cursor_position)
            .map(|(index, _)| index)
            .unwrap_or(self.search.len())
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let index = self.cursor_byte_index();
        self.search.insert(index, c);
        self.cursor_position += 1;
        self.refresh();
    }

    /// Delete character before cursor position (backspace)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let index = self.cursor_byte_index();
            self.search.remove(index);
            self.refresh();
        }
    }

    /// Delete character at cursor position
    pub fn delete_char(&mut self) {
        if self.cursor_position < self.search.chars().count() {
            let index = self.cursor_byte_index();
            self.search.remove(index);
            self.refresh();
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.search.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Step the author selector, wrapping at either end
    pub fn cycle_author(&mut self, delta: isize) {
        self.author_index = wrap_index(self.author_index, delta, self.author_choices.len());
        self.refresh();
    }

    /// Step the tag selector, wrapping at either end
    pub fn cycle_tag(&mut self, delta: isize) {
        self.tag_index = wrap_index(self.tag_index, delta, self.tag_choices.len());
        self.refresh();
    }

    /// Scroll the quote cards by a number of lines (positive = down)
    pub fn scroll_by(&mut self, delta: i32) {
        let max_pos = self.card_height().saturating_sub(1);
        self.scroll_position = if delta < 0 {
            self.scroll_position.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.scroll_position.saturating_add(delta as usize).min(max_pos)
        };
    }

    /// Show or hide author biographies on the quote cards
    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
        let max_pos = self.card_height().saturating_sub(1);
        self.scroll_position = self.scroll_position.min(max_pos);
    }

    /// Lines per quote card in the current detail mode
    pub fn card_lines(&self) -> usize {
        if self.show_details {
            CARD_LINES + 1
        } else {
            CARD_LINES
        }
    }

    /// Unwrapped line count of the rendered quote cards
    pub fn card_height(&self) -> usize {
        self.result.preview_records.len() * self.card_lines()
    }
}

/// Lines per collapsed quote card: text, attribution, birth, tags, separator
pub const CARD_LINES: usize = 5;

fn with_all(options: Vec<String>) -> Vec<String> {
    std::iter::once(ALL.to_string()).chain(options).collect()
}

fn cycle_delta(code: KeyCode) -> Option<isize> {
    match code {
        KeyCode::Left | KeyCode::Up => Some(-1),
        KeyCode::Right | KeyCode::Down => Some(1),
        _ => None,
    }
}

fn wrap_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current as isize + delta).rem_euclid(len as isize) as usize
}
