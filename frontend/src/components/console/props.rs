//! Session-derived properties for the console component.
//!
//! The server-rendered page exposes the signed-in username and the per-user
//! tab visibility flags as `data-*` attributes on the document body; they are
//! read once on startup. Missing attributes default to visible so a bare dev
//! page still renders every tab.

use yew::Properties;

#[derive(Properties, Clone, PartialEq)]
pub struct ConsoleProps {
    #[prop_or_default]
    pub username: String,
    #[prop_or(true)]
    pub show_display: bool,
    #[prop_or(true)]
    pub show_create_update: bool,
    #[prop_or(true)]
    pub show_send_file: bool,
    #[prop_or(true)]
    pub show_jobnumbers_management: bool,
    #[prop_or(true)]
    pub show_parameters: bool,
}

impl ConsoleProps {
    pub fn from_session() -> Self {
        ConsoleProps {
            username: session_attr("data-username").unwrap_or_default(),
            show_display: session_flag("data-show-display"),
            show_create_update: session_flag("data-show-create-update"),
            show_send_file: session_flag("data-show-send-file"),
            show_jobnumbers_management: session_flag("data-show-jobnumbers-management"),
            show_parameters: session_flag("data-show-parameters"),
        }
    }
}

fn session_attr(name: &str) -> Option<String> {
    web_sys::window()?.document()?.body()?.get_attribute(name)
}

fn session_flag(name: &str) -> bool {
    session_attr(name).map(|v| v == "true").unwrap_or(true)
}
