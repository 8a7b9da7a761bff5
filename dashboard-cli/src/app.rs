use crate::warning::WarningBanner;
use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fan_dashboard_protocol::{FanToggleResponse, SetpointResponse, StatusSnapshot};
use ratatui::widgets::TableState;
use std::time::{Duration, Instant};
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, Eq, PartialEq, EnumIter, Display)]
pub(crate) enum Field {
    #[strum(to_string = "Fan status")]
    FanStatus,
    #[strum(to_string = "Current fan output")]
    CurrentFanOutput,
    #[strum(to_string = "Set fan output")]
    SetFanOutput,
    #[strum(to_string = "Current temperature")]
    CurrentTemp,
}

/// A response from the fan controller, routed back to the UI.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Update {
    Status(StatusSnapshot),
    SetpointConfirmed(SetpointResponse),
    FanToggled(FanToggleResponse),
}

impl Update {
    /// The display values this update overwrites.
    pub(crate) fn values(&self) -> Vec<(Field, String)> {
        match self {
            Update::Status(status) => vec![
                (Field::FanStatus, status.fan_status_text()),
                (Field::CurrentFanOutput, status.current_fan_output_text()),
                (Field::SetFanOutput, status.set_fan_output_text()),
                (Field::CurrentTemp, status.current_temp_text()),
            ],
            Update::SetpointConfirmed(response) => {
                vec![(Field::SetFanOutput, response.set_fan_output_text())]
            }
            Update::FanToggled(response) => vec![(Field::FanStatus, response.fan_status.clone())],
        }
    }
}

/// What the dashboard should do in response to a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Submit(String),
    ToggleFan,
    Quit,
}

#[derive(Debug)]
pub(crate) struct TableField {
    pub(crate) name: Field,
    pub(crate) value: Option<String>,
    pub(crate) updated: DateTime<Utc>,
}

impl TableField {
    fn new(name: Field) -> Self {
        Self {
            name,
            value: None,
            updated: Utc::now(),
        }
    }
}

pub(crate) struct App {
    pub(crate) items: Vec<TableField>,
    pub(crate) table_state: TableState,
    pub(crate) input: String,
    warning: WarningBanner,
}

impl App {
    pub(crate) fn new(warning_duration: Duration) -> Self {
        let items = Field::iter().map(TableField::new).collect::<Vec<_>>();

        let mut table_state = TableState::default();
        table_state.select(Some(0));

        Self {
            items,
            table_state,
            input: String::new(),
            warning: WarningBanner::new(warning_duration),
        }
    }

    fn next(&mut self) {
        self.table_state.scroll_down_by(1);
    }

    fn previous(&mut self) {
        self.table_state.scroll_up_by(1);
    }

    fn update_field(&mut self, field: Field, value: String) {
        if let Some(item) = self.items.iter_mut().find(|item| item.name == field) {
            item.value = Some(value);
            item.updated = Utc::now();
        }
    }

    pub(crate) fn apply(&mut self, update: Update) {
        for (field, value) in update.values() {
            self.update_field(field, value);
        }
    }

    pub(crate) fn value(&self, field: Field) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.name == field)
            .and_then(|item| item.value.as_deref())
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>, now: Instant) {
        self.warning.show(message, now);
    }

    pub(crate) fn warning(&self, now: Instant) -> Option<&str> {
        self.warning.message(now)
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Action::Quit,
                KeyCode::Char('t') => Action::ToggleFan,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Enter => Action::Submit(std::mem::take(&mut self.input)),
            KeyCode::Backspace => {
                self.input.pop();
                Action::None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                Action::None
            }
            KeyCode::Down => {
                self.next();
                Action::None
            }
            KeyCode::Up => {
                self.previous();
                Action::None
            }
            _ => Action::None,
        }
    }
}
