//! Update function for the console component, Elm-style: receives the current
//! state, the context and a message, mutates the state and returns whether
//! the view should re-render.
//!
//! Key behaviors
//! - Symbol lists are validated before any request leaves the client; a
//!   validation failure aborts the submission with a warning.
//! - Each data tab runs at most one request at a time. Submissions are
//!   stamped with a lifecycle epoch; completions carrying a stale epoch
//!   (e.g. resolving after `Clear`) are discarded without touching the view.
//! - A 30-second failsafe stops a stuck progress indicator. It fails the
//!   lifecycle for the same epoch only, and does not cancel the request.

use common::lifecycle::Tab;
use common::model::log;
use common::rows;
use common::symbols;
use gloo_console::error as console_error;
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::download;

use super::helpers::{get_json, post_form, response_message};
use super::messages::{Msg, UserFlag};
use super::state::{ChatMessage, ConsoleComponent};

/// Upper bound on how long the progress indicator may stay visible.
const LOADING_FAILSAFE_MS: u32 = 30_000;

pub fn update(component: &mut ConsoleComponent, ctx: &Context<ConsoleComponent>, msg: Msg) -> bool {
    match msg {
        Msg::SetActiveTab(tab) => {
            component.active_tab = tab;
            true
        }
        Msg::SymbolsInput(tab, text) => {
            component.set_input(tab, text);
            true
        }

        Msg::Submit(tab) => submit(component, ctx, tab),
        Msg::Clear(tab) => clear(component, tab),

        Msg::LookupLoaded { epoch, result } => match result {
            Ok(loaded) => {
                if !component.display.finish_ok(epoch) {
                    return false;
                }
                let count = loaded.len();
                component.display_rows = loaded;
                if count >= 1 {
                    component.notifier.success(
                        &format!("Found {count} metadata records"),
                        "Search Complete",
                    );
                } else {
                    component.notifier.info(
                        "No metadata records found for the provided symbols",
                        "Search Complete",
                    );
                }
                true
            }
            Err(message) => {
                if !component.display.finish_err(epoch) {
                    return false;
                }
                component.notifier.error(&message, "Search Error");
                true
            }
        },

        Msg::ActionsLoaded { epoch, result } => match result {
            Ok(loaded) => {
                if !component.create_update.finish_ok(epoch) {
                    return false;
                }
                let count = loaded.len();
                component.action_rows = loaded;
                if count >= 1 {
                    component.notifier.success(
                        &format!("Processed {count} metadata records"),
                        "Send Complete",
                    );
                } else {
                    component
                        .notifier
                        .info("No records found in the response", "Send Complete");
                }
                true
            }
            Err(message) => {
                if !component.create_update.finish_err(epoch) {
                    return false;
                }
                component.notifier.error(&message, "Send Error");
                true
            }
        },

        Msg::FilesLoaded { epoch, result } => match result {
            Ok(loaded) => {
                if !component.send_files.finish_ok(epoch) {
                    return false;
                }
                let count = loaded.len();
                component.file_rows = loaded;
                // The (possibly empty) results table is shown either way so
                // "ran with nothing to show" stays visible.
                if count >= 1 {
                    component
                        .notifier
                        .success(&format!("Processed {count} files"), "Upload Complete");
                } else {
                    component
                        .notifier
                        .info("No files were processed", "Upload Complete");
                }
                true
            }
            Err(message) => {
                if !component.send_files.finish_err(epoch) {
                    return false;
                }
                component.notifier.error(&message, "Upload Error");
                true
            }
        },

        Msg::LoadingFailsafe { tab, epoch } => {
            if component.lifecycle_mut(tab).finish_err(epoch) {
                component.notifier.error(
                    "The request did not complete in time. The operation may still be running on the server.",
                    "Request Timeout",
                );
                true
            } else {
                false
            }
        }

        Msg::ExportCsv(tab) => {
            let csv = common::export::to_csv(&component.table_snapshot(tab));
            download::download_text(&csv, "export.csv", "text/csv");
            component
                .notifier
                .success("CSV file downloaded successfully!", "Export Complete");
            false
        }
        Msg::ExportXls(tab) => {
            let uri = common::export::to_xls_data_uri(&component.table_snapshot(tab));
            download::download_uri(&uri, "export.xls");
            component
                .notifier
                .success("Excel file downloaded successfully!", "Export Complete");
            false
        }

        Msg::SitesLoaded(sites) => {
            component.sites = sites;
            true
        }
        Msg::LogsLoaded(entries) => {
            component.logs = entries;
            true
        }
        Msg::ReloadLogs => {
            load_logs(ctx);
            false
        }

        Msg::LogUserFilter(value) => {
            component.log_query.user = value;
            true
        }
        Msg::LogActionFilter(value) => {
            component.log_query.action = value;
            true
        }
        Msg::LogDateFilter(value) => {
            component.log_query.date = value;
            true
        }
        Msg::ClearLogFilters => {
            component.log_query = Default::default();
            true
        }
        Msg::ExportLogsCsv => {
            let csv = common::export::to_csv(&component.logs_snapshot());
            download::download_text(&csv, "export.csv", "text/csv");
            component
                .notifier
                .success("CSV file downloaded successfully!", "Export Complete");
            false
        }

        Msg::UserSite(value) => {
            component.new_user.site = value;
            true
        }
        Msg::UserEmail(value) => {
            component.new_user.email = value;
            true
        }
        Msg::UserPassword(value) => {
            component.new_user.password = value;
            true
        }
        Msg::UserFlagToggled(flag) => {
            let form = &mut component.new_user;
            match flag {
                UserFlag::Display => form.show_display = !form.show_display,
                UserFlag::CreateUpdate => form.show_create_update = !form.show_create_update,
                UserFlag::SendFile => form.show_send_file = !form.show_send_file,
                UserFlag::JobNumbers => {
                    form.show_jobnumbers_management = !form.show_jobnumbers_management
                }
                UserFlag::Parameters => form.show_parameters = !form.show_parameters,
            }
            true
        }
        Msg::SubmitNewUser => submit_new_user(component, ctx),
        Msg::UserSaved(result) => {
            match result {
                Ok(message) => {
                    component.notifier.success(&message, "User Created");
                    component.new_user = Default::default();
                }
                Err(message) => component.notifier.error(&message, "User Creation Error"),
            }
            true
        }

        Msg::SiteCode(value) => {
            component.new_site.code = value;
            true
        }
        Msg::SiteLabel(value) => {
            component.new_site.label = value;
            true
        }
        Msg::SitePrefix(value) => {
            component.new_site.prefix = value;
            true
        }
        Msg::SubmitNewSite => submit_new_site(component, ctx),
        Msg::SiteSaved(result) => {
            match result {
                Ok(message) => {
                    component.notifier.success(&message, "Site Created");
                    component.new_site = Default::default();
                    // The site select of the user form feeds from this list.
                    load_sites(ctx);
                }
                Err(message) => component.notifier.error(&message, "Site Creation Error"),
            }
            true
        }

        Msg::PwdEmail(value) => {
            component.pwd_email = value;
            true
        }
        Msg::PwdNewPassword(value) => {
            component.pwd_new_password = value;
            true
        }
        Msg::SubmitPasswordChange => submit_password_change(component, ctx),
        Msg::PasswordChanged(result) => {
            match result {
                Ok(message) => {
                    component.notifier.success(&message, "Password Changed");
                    component.pwd_email = String::new();
                    component.pwd_new_password = String::new();
                }
                Err(message) => component.notifier.error(&message, "Password Change Error"),
            }
            true
        }

        Msg::ChatInput(value) => {
            component.chat_input = value;
            true
        }
        Msg::SendChat => send_chat(component, ctx),
        Msg::ChatReplied(result) => {
            component.chat_busy = false;
            match result {
                Ok(answer) => component.chat_history.push(ChatMessage {
                    from_user: false,
                    text: answer,
                }),
                Err(message) => component.notifier.error(&message, "Assistant Error"),
            }
            true
        }
        Msg::ExportChat => {
            let transcript = component
                .chat_history
                .iter()
                .map(|m| {
                    format!(
                        "{}: {}",
                        if m.from_user { "You" } else { "Assistant" },
                        m.text
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            download::download_text(&transcript, "chat_history.txt", "text/plain");
            false
        }
    }
}

/// Validates the tab's symbol list and, when allowed, issues exactly one
/// request to the tab's endpoint with the normalized list as the sole field.
fn submit(component: &mut ConsoleComponent, ctx: &Context<ConsoleComponent>, tab: Tab) -> bool {
    let symbols = match symbols::validate(component.input(tab), "Document Symbols") {
        Ok(symbols) => symbols,
        Err(err) => {
            component
                .notifier
                .warning(&err.to_string(), "Validation Error");
            return true;
        }
    };

    let Some(epoch) = component.lifecycle_mut(tab).try_begin(true) else {
        // A request for this tab is already in flight.
        return false;
    };
    component.clear_rows(tab);

    let link = ctx.link().clone();
    match tab {
        Tab::Display => {
            // Only the lookup path upper-cases before submission.
            let body = symbols::submission_text(&symbols::uppercased(&symbols));
            spawn_local(async move {
                let result = post_form("./loading_symbol", &[("docsymbols", body)])
                    .await
                    .map(|value| rows::map_lookup(&value));
                link.send_message(Msg::LookupLoaded { epoch, result });
            });
        }
        Tab::CreateUpdate => {
            let body = symbols::submission_text(&symbols);
            spawn_local(async move {
                let result = post_form("./create_metadata_ods", &[("docsymbols1", body)])
                    .await
                    .map(|value| rows::map_actions(&value));
                link.send_message(Msg::ActionsLoaded { epoch, result });
            });
        }
        Tab::SendFiles => {
            let body = symbols::submission_text(&symbols);
            spawn_local(async move {
                let result = post_form("./exporttoodswithfile", &[("docsymbols2", body)])
                    .await
                    .map(|value| rows::map_file_results(&value));
                link.send_message(Msg::FilesLoaded { epoch, result });
            });
        }
    }

    arm_failsafe(ctx, tab, epoch);
    true
}

fn arm_failsafe(ctx: &Context<ConsoleComponent>, tab: Tab, epoch: u64) {
    let link = ctx.link().clone();
    spawn_local(async move {
        TimeoutFuture::new(LOADING_FAILSAFE_MS).await;
        link.send_message(Msg::LoadingFailsafe { tab, epoch });
    });
}

fn clear(component: &mut ConsoleComponent, tab: Tab) -> bool {
    if !component.lifecycle_mut(tab).clear() {
        return false;
    }
    component.clear_rows(tab);
    component.set_input(tab, String::new());
    component
        .notifier
        .success("Results and input cleared", "Clear Complete");
    true
}

fn submit_new_user(component: &mut ConsoleComponent, ctx: &Context<ConsoleComponent>) -> bool {
    let form = component.new_user.clone();
    if !form.is_valid() {
        component
            .notifier
            .warning("Please check the inputs!", "Validation Error");
        return true;
    }

    let link = ctx.link().clone();
    spawn_local(async move {
        let fields = [
            ("site", form.site.clone()),
            ("email", form.email.clone()),
            ("password", form.password.clone()),
            ("show_display", form.show_display.to_string()),
            ("show_create_update", form.show_create_update.to_string()),
            ("show_send_file", form.show_send_file.to_string()),
            (
                "show_jobnumbers_management",
                form.show_jobnumbers_management.to_string(),
            ),
            ("show_parameters", form.show_parameters.to_string()),
        ];
        let result = post_form("./add_user", &fields)
            .await
            .map(|value| response_message(&value, "User created"));
        link.send_message(Msg::UserSaved(result));
    });
    false
}

fn submit_new_site(component: &mut ConsoleComponent, ctx: &Context<ConsoleComponent>) -> bool {
    let form = component.new_site.clone();
    if !form.is_valid() {
        component
            .notifier
            .warning("Please check the inputs!", "Validation Error");
        return true;
    }

    let link = ctx.link().clone();
    spawn_local(async move {
        let fields = [
            ("code_site", form.code.to_uppercase()),
            ("label_site", form.label.clone()),
            ("prefix_site", form.prefix.to_uppercase()),
        ];
        let result = post_form("./add_site", &fields)
            .await
            .map(|value| response_message(&value, "Site created"));
        link.send_message(Msg::SiteSaved(result));
    });
    false
}

fn submit_password_change(
    component: &mut ConsoleComponent,
    ctx: &Context<ConsoleComponent>,
) -> bool {
    if component.pwd_email.is_empty() || component.pwd_new_password.is_empty() {
        component
            .notifier
            .warning("Please check the inputs!", "Validation Error");
        return true;
    }

    let fields = [
        ("email", component.pwd_email.clone()),
        ("new_password", component.pwd_new_password.clone()),
    ];
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = post_form("./change_password", &fields).await.and_then(|value| {
            let message = response_message(&value, "Password updated");
            if value.get("success").and_then(Value::as_bool).unwrap_or(false) {
                Ok(message)
            } else {
                Err(message)
            }
        });
        link.send_message(Msg::PasswordChanged(result));
    });
    false
}

fn send_chat(component: &mut ConsoleComponent, ctx: &Context<ConsoleComponent>) -> bool {
    let message = component.chat_input.trim().to_string();
    if message.is_empty() || component.chat_busy {
        return false;
    }
    component.chat_history.push(ChatMessage {
        from_user: true,
        text: message.clone(),
    });
    component.chat_input = String::new();
    component.chat_busy = true;

    let link = ctx.link().clone();
    spawn_local(async move {
        let result = post_form("./chatbot", &[("message", message)])
            .await
            .and_then(|value| {
                if value.get("success").and_then(Value::as_bool).unwrap_or(false) {
                    Ok(value
                        .get("response")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string())
                } else {
                    Err(value
                        .get("error")
                        .and_then(Value::as_str)
                        .unwrap_or("The assistant could not answer")
                        .to_string())
                }
            });
        link.send_message(Msg::ChatReplied(result));
    });
    true
}

/// Fetches the site list (once at startup, and again after a site is added).
pub fn load_sites(ctx: &Context<ConsoleComponent>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        match get_json("./get_sites").await {
            Ok(value) => link.send_message(Msg::SitesLoaded(decode_sites(&value))),
            Err(message) => console_error!("loading sites failed:", message),
        }
    });
}

/// Fetches the audit log (once at startup, and on explicit reload).
pub fn load_logs(ctx: &Context<ConsoleComponent>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        match get_json("./display_logs").await {
            Ok(value) => link.send_message(Msg::LogsLoaded(log::from_response(&value))),
            Err(message) => console_error!("loading logs failed:", message),
        }
    });
}

fn decode_sites(value: &Value) -> Vec<String> {
    #[derive(serde::Deserialize)]
    struct SiteWire {
        code_site: String,
    }

    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    serde_json::from_value::<SiteWire>(item.clone())
                        .ok()
                        .map(|site| site.code_site)
                })
                .collect()
        })
        .unwrap_or_default()
}
