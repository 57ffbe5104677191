use common::lifecycle::Tab;
use common::model::log::AuditLogEntry;
use common::model::row::{ActionResult, DisplayRow, FileResult};

/// Tab-visibility checkboxes of the new-user form.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum UserFlag {
    Display,
    CreateUpdate,
    SendFile,
    JobNumbers,
    Parameters,
}

pub enum Msg {
    SetActiveTab(String),

    // Data tabs
    SymbolsInput(Tab, String),
    Submit(Tab),
    Clear(Tab),
    LookupLoaded {
        epoch: u64,
        result: Result<Vec<DisplayRow>, String>,
    },
    ActionsLoaded {
        epoch: u64,
        result: Result<Vec<ActionResult>, String>,
    },
    FilesLoaded {
        epoch: u64,
        result: Result<Vec<FileResult>, String>,
    },
    LoadingFailsafe {
        tab: Tab,
        epoch: u64,
    },
    ExportCsv(Tab),
    ExportXls(Tab),

    // Reference data
    SitesLoaded(Vec<String>),
    LogsLoaded(Vec<AuditLogEntry>),
    ReloadLogs,

    // Log filters
    LogUserFilter(String),
    LogActionFilter(String),
    LogDateFilter(String),
    ClearLogFilters,
    ExportLogsCsv,

    // New user form
    UserSite(String),
    UserEmail(String),
    UserPassword(String),
    UserFlagToggled(UserFlag),
    SubmitNewUser,
    UserSaved(Result<String, String>),

    // New site form
    SiteCode(String),
    SiteLabel(String),
    SitePrefix(String),
    SubmitNewSite,
    SiteSaved(Result<String, String>),

    // Password change
    PwdEmail(String),
    PwdNewPassword(String),
    SubmitPasswordChange,
    PasswordChanged(Result<String, String>),

    // Help chatbot
    ChatInput(String),
    SendChat,
    ChatReplied(Result<String, String>),
    ExportChat,
}
