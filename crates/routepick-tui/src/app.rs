//! Terminal application state and input handling.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use routepick_core::prelude::*;

/// Where keyboard input goes when no dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search,
}

pub struct App {
    pub coordinator: EditingCoordinator<InMemoryStore>,
    pub mode: Mode,
    /// Sidebar position, depot included.
    pub cursor: usize,
    /// Highlighted option in the skill dialog.
    pub dialog_cursor: usize,
    pub search_input: String,
    pub status: Option<String>,
    /// Inner area of the map widget from the last draw.
    pub map_area: Rect,
    pub should_quit: bool,
}

impl App {
    pub fn new(coordinator: EditingCoordinator<InMemoryStore>) -> Self {
        let mut app = Self {
            coordinator,
            mode: Mode::Browse,
            cursor: 0,
            dialog_cursor: 0,
            search_input: String::new(),
            status: None,
            map_area: Rect::default(),
            should_quit: false,
        };
        app.hover_cursor();
        app
    }

    pub fn selectable_skills(&self) -> Vec<SkillOption> {
        self.coordinator.catalog().selectable().copied().collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.coordinator.dialog().is_open() {
            self.handle_dialog_key(key);
            return;
        }
        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Search => self.handle_search_key(key),
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let skills = self.selectable_skills();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.dialog_cursor = self.dialog_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.dialog_cursor + 1 < skills.len() {
                    self.dialog_cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(option) = skills.get(self.dialog_cursor) {
                    self.coordinator.choose_skill(option.value);
                }
            }
            KeyCode::Enter => match self.coordinator.handle_dialog_confirm() {
                ConfirmOutcome::Committed => {
                    self.status = Some("Location added".to_string());
                    self.cursor = self.coordinator.collection().len().saturating_sub(1);
                    self.hover_cursor();
                }
                ConfirmOutcome::Rejected(error) => {
                    if !self.coordinator.dialog().is_open() {
                        self.status = Some(format!("{error}, selection discarded"));
                    }
                }
                ConfirmOutcome::Ignored => {}
            },
            KeyCode::Esc => {
                self.coordinator.handle_dialog_cancel();
                self.status = Some("Selection cancelled".to_string());
            }
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                self.search_input.clear();
                self.status = None;
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Char('s') => self.cycle_skill(),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_current(),
            KeyCode::Char('c') => {
                self.coordinator.clear();
                self.cursor = 0;
                self.status = Some("Cleared all locations".to_string());
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => self.search_input.push(c),
            KeyCode::Enter => match SearchResult::parse_query(&self.search_input) {
                Ok(result) => {
                    self.mode = Mode::Browse;
                    self.open_dialog(InteractionEvent::Search(result));
                }
                Err(err) => self.status = Some(err.to_string()),
            },
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left)
            || self.coordinator.dialog().is_open()
        {
            return;
        }
        if let Some(coordinate) = cell_to_coordinates(self.map_area, mouse.column, mouse.row) {
            self.open_dialog(InteractionEvent::Map(MapClick { coordinate }));
        }
    }

    fn open_dialog(&mut self, event: InteractionEvent) {
        self.dialog_cursor = 0;
        self.status = None;
        self.coordinator.handle_interaction(event);
    }

    pub fn current_row_id(&self) -> Option<LocationId> {
        self.coordinator
            .collection()
            .row_at(self.cursor)
            .map(LocationEntry::id)
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.coordinator.collection().len();
        if len == 0 {
            return;
        }
        if let Some(id) = self.current_row_id() {
            self.coordinator.leave_row(id);
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
        self.hover_cursor();
    }

    fn hover_cursor(&mut self) {
        let len = self.coordinator.collection().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        if let Some(id) = self.current_row_id() {
            self.coordinator.hover_row(id);
        }
    }

    /// Move the current row to the next selectable skill.
    fn cycle_skill(&mut self) {
        let Some(row) = self.coordinator.collection().row_at(self.cursor) else {
            return;
        };
        let (id, current) = (row.id(), row.required_skill());
        let skills = self.selectable_skills();
        if skills.is_empty() {
            return;
        }
        let next = skills
            .iter()
            .position(|option| option.value == current)
            .map_or(0, |index| (index + 1) % skills.len());
        let skill = skills[next].value;
        debug!(%id, %skill, "Cycling skill");
        self.coordinator.change_row_skill(id, skill);
    }

    fn remove_current(&mut self) {
        let Some(row) = self.coordinator.collection().row_at(self.cursor) else {
            return;
        };
        let id = row.id();
        if !row.remove_enabled() {
            self.status = Some(format!("Location {id} cannot be removed now"));
            return;
        }
        self.coordinator.click_remove(id);
        self.status = Some(format!("Removed location {id}"));
        self.hover_cursor();
    }
}

/// Convert a terminal cell inside the map area to a coordinate.
///
/// The map spans longitude -180..180 left to right and latitude 90..-90
/// top to bottom; the cell centre is used.
pub fn cell_to_coordinates(area: Rect, column: u16, row: u16) -> Option<Coordinates> {
    if area.width == 0
        || area.height == 0
        || column < area.x
        || row < area.y
        || column >= area.x + area.width
        || row >= area.y + area.height
    {
        return None;
    }
    let x = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
    let y = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
    let lng = -180.0 + x * 360.0;
    let lat = 90.0 - y * 180.0;
    Some(Coordinates::new(round(lat), round(lng)))
}

fn round(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}
