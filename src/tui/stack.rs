// Panel stack (main view with an optional details overlay) and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::engine::AggregationEngine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Main,
    /// `container_id` is `None` when the typed index matched no container.
    Details {
        index: usize,
        container_id: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct PanelStack {
    views: Vec<View>,
}

impl Default for PanelStack {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelStack {
    pub fn new() -> Self {
        Self {
            views: vec![View::Main],
        }
    }

    pub fn top(&self) -> &View {
        self.views.last().unwrap_or(&View::Main)
    }

    pub fn depth(&self) -> usize {
        self.views.len()
    }

    pub fn push(&mut self, view: View) {
        self.views.push(view);
    }

    /// Pops the top panel. `None` when only the main panel is left.
    pub fn pop(&mut self) -> Option<View> {
        if self.views.len() < 2 {
            return None;
        }
        self.views.pop()
    }

    /// Opens details for `index`; a second selection replaces the open details panel.
    pub fn show_details(&mut self, index: usize, container_id: Option<String>) {
        let view = View::Details {
            index,
            container_id,
        };
        if matches!(self.views.last(), Some(View::Details { .. })) {
            self.views.pop();
        }
        self.push(view);
    }

    /// `q` closes the top panel (quitting from the main one), `0`-`9` opens details.
    pub fn handle_key(&mut self, key: KeyEvent, engine: &AggregationEngine) -> KeyOutcome {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyOutcome::Quit,
            KeyCode::Char('q') => match self.pop() {
                Some(_) => KeyOutcome::Continue,
                None => KeyOutcome::Quit,
            },
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let index = usize::from(c as u8 - b'0');
                let container_id = match engine.selected_for_details(index) {
                    Ok(id) => Some(id),
                    Err(e) => {
                        tracing::debug!(error = %e, "details selection");
                        None
                    }
                };
                self.show_details(index, container_id);
                KeyOutcome::Continue
            }
            _ => KeyOutcome::Continue,
        }
    }
}
