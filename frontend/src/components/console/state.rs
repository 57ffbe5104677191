//! State container for the console component.
//!
//! Each of the three data tabs owns an independent lifecycle, input text and
//! row collection; they never share mutable state, so a lookup and a file
//! send can be in flight at the same time. Sites and audit logs are loaded
//! once at initialization and only read afterwards.

use std::rc::Rc;

use common::lifecycle::{Tab, TabLifecycle};
use common::model::forms::{NewSiteForm, NewUserForm};
use common::model::log::{self, AuditLogEntry, LogQuery};
use common::model::row::{self, ActionResult, DisplayRow, FileResult};

use crate::notify::{Notifier, ToastNotifier};

/// One exchange in the help-chat panel.
pub struct ChatMessage {
    pub from_user: bool,
    pub text: String,
}

pub struct ConsoleComponent {
    pub active_tab: String,

    // Display tab
    pub display: TabLifecycle,
    pub docsymbols: String,
    pub display_rows: Vec<DisplayRow>,

    // Create/Update tab
    pub create_update: TabLifecycle,
    pub docsymbols1: String,
    pub action_rows: Vec<ActionResult>,

    // Send Files tab
    pub send_files: TabLifecycle,
    pub docsymbols2: String,
    pub file_rows: Vec<FileResult>,

    // Reference data, loaded once
    pub sites: Vec<String>,
    pub logs: Vec<AuditLogEntry>,
    pub log_query: LogQuery,

    // Parameters forms
    pub new_user: NewUserForm,
    pub new_site: NewSiteForm,
    pub pwd_email: String,
    pub pwd_new_password: String,

    // Help chatbot
    pub chat_history: Vec<ChatMessage>,
    pub chat_input: String,
    pub chat_busy: bool,

    pub loaded: bool,
    pub notifier: Rc<dyn Notifier>,
}

impl ConsoleComponent {
    pub fn new() -> Self {
        Self::with_notifier(Rc::new(ToastNotifier))
    }

    pub fn with_notifier(notifier: Rc<dyn Notifier>) -> Self {
        Self {
            active_tab: "display".to_string(),
            display: TabLifecycle::default(),
            docsymbols: String::new(),
            display_rows: Vec::new(),
            create_update: TabLifecycle::default(),
            docsymbols1: String::new(),
            action_rows: Vec::new(),
            send_files: TabLifecycle::default(),
            docsymbols2: String::new(),
            file_rows: Vec::new(),
            sites: Vec::new(),
            logs: Vec::new(),
            log_query: LogQuery::default(),
            new_user: NewUserForm::default(),
            new_site: NewSiteForm::default(),
            pwd_email: String::new(),
            pwd_new_password: String::new(),
            chat_history: Vec::new(),
            chat_input: String::new(),
            chat_busy: false,
            loaded: false,
            notifier,
        }
    }

    pub fn lifecycle(&self, tab: Tab) -> &TabLifecycle {
        match tab {
            Tab::Display => &self.display,
            Tab::CreateUpdate => &self.create_update,
            Tab::SendFiles => &self.send_files,
        }
    }

    pub fn lifecycle_mut(&mut self, tab: Tab) -> &mut TabLifecycle {
        match tab {
            Tab::Display => &mut self.display,
            Tab::CreateUpdate => &mut self.create_update,
            Tab::SendFiles => &mut self.send_files,
        }
    }

    pub fn input(&self, tab: Tab) -> &str {
        match tab {
            Tab::Display => &self.docsymbols,
            Tab::CreateUpdate => &self.docsymbols1,
            Tab::SendFiles => &self.docsymbols2,
        }
    }

    pub fn set_input(&mut self, tab: Tab, text: String) {
        match tab {
            Tab::Display => self.docsymbols = text,
            Tab::CreateUpdate => self.docsymbols1 = text,
            Tab::SendFiles => self.docsymbols2 = text,
        }
    }

    pub fn clear_rows(&mut self, tab: Tab) {
        match tab {
            Tab::Display => self.display_rows.clear(),
            Tab::CreateUpdate => self.action_rows.clear(),
            Tab::SendFiles => self.file_rows.clear(),
        }
    }

    /// Snapshot of the tab's currently rendered table (header plus rows) as
    /// display strings, for the exporters. An already-cleared tab snapshots
    /// to a header-only table.
    pub fn table_snapshot(&self, tab: Tab) -> Vec<Vec<String>> {
        match tab {
            Tab::Display => std::iter::once(row::display_header())
                .chain(self.display_rows.iter().map(DisplayRow::cells))
                .collect(),
            Tab::CreateUpdate => std::iter::once(ActionResult::header())
                .chain(self.action_rows.iter().map(ActionResult::cells))
                .collect(),
            Tab::SendFiles => std::iter::once(FileResult::header())
                .chain(self.file_rows.iter().map(FileResult::cells))
                .collect(),
        }
    }

    /// Snapshot of the audit-log table as rendered, with the current filters
    /// applied, for export.
    pub fn logs_snapshot(&self) -> Vec<Vec<String>> {
        log::export_snapshot(&self.logs, &self.log_query)
    }
}
