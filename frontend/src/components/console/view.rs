//! View rendering for the console component.
//!
//! One card with a tab bar (Display / Create-Update / Send Files /
//! Parameters / Help); each data tab is a textarea, a submit/clear button
//! pair, a progress indicator driven by the tab's lifecycle, the results
//! table, and the export buttons. Tab visibility follows the session props.

use common::lifecycle::Tab;
use common::model::log;
use common::model::row::{ActionResult, DisplayRow, FileResult, display_header};
use web_sys::{Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, KeyboardEvent};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::{Msg, UserFlag};
use super::state::ConsoleComponent;

pub fn view(component: &ConsoleComponent, ctx: &Context<ConsoleComponent>) -> Html {
    let link = ctx.link();
    let props = ctx.props();

    html! {
        <div class="container-fluid">
            <div class="modern-card">
                <div class="card-header description-section">
                    <div class="d-flex justify-content-between align-items-center">
                        <h1 class="card-title">{"ODS Actions"}</h1>
                        <div class="d-flex align-items-center gap-3">
                            <span class="user-name-header">{ &props.username }</span>
                            <a href="./logout" class="btn-modern btn-danger-modern">{"Sign Out"}</a>
                        </div>
                    </div>
                </div>

                <div class="card-body">
                    { build_tab_nav(component, link, ctx) }
                    <div class="tab-content mt-4">
                        {
                            match component.active_tab.as_str() {
                                "display" if props.show_display => build_display_tab(component, link),
                                "create-update" if props.show_create_update => build_create_update_tab(component, link),
                                "send-files" if props.show_send_file => build_send_files_tab(component, link),
                                "parameters" if props.show_parameters => build_parameters_tab(component, link),
                                "help" => build_help_tab(component, link),
                                _ => html! {},
                            }
                        }
                    </div>
                </div>
            </div>
        </div>
    }
}

fn build_tab_nav(
    component: &ConsoleComponent,
    link: &Scope<ConsoleComponent>,
    ctx: &Context<ConsoleComponent>,
) -> Html {
    let props = ctx.props();
    let tab_button = |id: &'static str, label: &str| -> Html {
        let active = (component.active_tab == id).then_some("active");
        html! {
            <li class="nav-item">
                <button
                    class={classes!("nav-link", active)}
                    onclick={link.callback(move |_| Msg::SetActiveTab(id.to_string()))}
                >
                    { label }
                </button>
            </li>
        }
    };

    html! {
        <ul class="nav nav-tabs modern-nav-tabs">
            { if props.show_display { tab_button("display", "Display Metadata") } else { html! {} } }
            { if props.show_create_update { tab_button("create-update", "Send Metadata") } else { html! {} } }
            { if props.show_send_file { tab_button("send-files", "Send Files") } else { html! {} } }
            { if props.show_parameters { tab_button("parameters", "Parameters") } else { html! {} } }
            { tab_button("help", "Help") }
        </ul>
    }
}

fn symbols_textarea(
    component: &ConsoleComponent,
    link: &Scope<ConsoleComponent>,
    tab: Tab,
) -> Html {
    html! {
        <div class="row">
            <div class="col-12">
                <label class="form-label-modern">{"Document Symbols"}</label>
                <textarea
                    class="form-control-modern"
                    rows="4"
                    placeholder="Paste the list of symbols here (new line separated)."
                    value={component.input(tab).to_string()}
                    oninput={link.callback(move |e: InputEvent| {
                        let input: HtmlTextAreaElement = e.target_unchecked_into();
                        Msg::SymbolsInput(tab, input.value())
                    })}
                />
            </div>
        </div>
    }
}

fn progress(visible: bool, message: &str) -> Html {
    if !visible {
        return html! {};
    }
    html! {
        <div class="text-center mt-4">
            <div class="loading-spinner">
                <div class="spinner"></div>
                <p>{ message }</p>
            </div>
        </div>
    }
}

fn submit_clear_buttons(
    component: &ConsoleComponent,
    link: &Scope<ConsoleComponent>,
    tab: Tab,
    submit_label: &str,
) -> Html {
    let lifecycle = component.lifecycle(tab);
    let has_input = !component.input(tab).trim().is_empty();
    let can_clear = matches!(
        lifecycle.state(),
        common::lifecycle::TabState::Succeeded | common::lifecycle::TabState::Failed
    );

    html! {
        <div class="modern-button-group mt-3">
            <button
                class="btn-modern btn-primary-modern"
                type="button"
                disabled={!lifecycle.can_submit(has_input)}
                onclick={link.callback(move |_| Msg::Submit(tab))}
            >
                { submit_label }
            </button>
            {
                if can_clear {
                    html! {
                        <button
                            class="btn-modern btn-secondary-modern"
                            type="button"
                            onclick={link.callback(move |_| Msg::Clear(tab))}
                        >
                            {"Clear"}
                        </button>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn export_buttons(link: &Scope<ConsoleComponent>, tab: Tab) -> Html {
    html! {
        <div class="modern-action-buttons">
            <button
                class="btn-modern btn-info-modern"
                type="button"
                onclick={link.callback(move |_| Msg::ExportCsv(tab))}
            >
                {"Export to CSV"}
            </button>
            <button
                class="btn-modern btn-info-modern"
                type="button"
                onclick={link.callback(move |_| Msg::ExportXls(tab))}
            >
                {"Export to Excel"}
            </button>
        </div>
    }
}

fn results_table(header: Vec<String>, body: Vec<Vec<String>>) -> Html {
    html! {
        <div class="modern-table-container">
            <table class="modern-responsive-table">
                <thead>
                    <tr>
                        { for header.iter().map(|label| html! { <th>{ label }</th> }) }
                    </tr>
                </thead>
                <tbody>
                    {
                        for body.iter().map(|row| html! {
                            <tr>
                                {
                                    for row.iter().map(|cell| html! {
                                        <td style="white-space: pre-line;">{ cell }</td>
                                    })
                                }
                            </tr>
                        })
                    }
                </tbody>
            </table>
        </div>
    }
}

fn build_display_tab(component: &ConsoleComponent, link: &Scope<ConsoleComponent>) -> Html {
    let show_results = component.display.succeeded() && !component.display_rows.is_empty();
    html! {
        <div class="tab-pane show active">
            <div class="modern-controls-section">
                { symbols_textarea(component, link, Tab::Display) }
                { submit_clear_buttons(component, link, Tab::Display, "Apply") }
            </div>
            { progress(component.display.is_loading(), "Loading metadata...") }
            {
                if show_results {
                    html! {
                        <>
                            { results_table(
                                display_header(),
                                component.display_rows.iter().map(DisplayRow::cells).collect(),
                            ) }
                            { export_buttons(link, Tab::Display) }
                        </>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_create_update_tab(component: &ConsoleComponent, link: &Scope<ConsoleComponent>) -> Html {
    html! {
        <div class="tab-pane show active">
            <div class="modern-controls-section">
                { symbols_textarea(component, link, Tab::CreateUpdate) }
                { submit_clear_buttons(component, link, Tab::CreateUpdate, "Send") }
            </div>
            { progress(component.create_update.is_loading(), "Processing metadata...") }
            {
                if component.create_update.succeeded() {
                    html! {
                        <>
                            { results_table(
                                ActionResult::header(),
                                component.action_rows.iter().map(ActionResult::cells).collect(),
                            ) }
                            { export_buttons(link, Tab::CreateUpdate) }
                        </>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_send_files_tab(component: &ConsoleComponent, link: &Scope<ConsoleComponent>) -> Html {
    // The table shows on every completion, even with zero rows, so the user
    // can tell "ran with nothing to show" apart from "never ran".
    html! {
        <div class="tab-pane show active">
            <div class="modern-controls-section">
                { symbols_textarea(component, link, Tab::SendFiles) }
                { submit_clear_buttons(component, link, Tab::SendFiles, "Send Files") }
            </div>
            { progress(component.send_files.is_loading(), "Uploading files...") }
            {
                if component.send_files.succeeded() {
                    html! {
                        <>
                            { results_table(
                                FileResult::header(),
                                component.file_rows.iter().map(FileResult::cells).collect(),
                            ) }
                            {
                                if component.file_rows.is_empty() {
                                    html! { <p class="text-muted">{"No records to display."}</p> }
                                } else {
                                    html! {}
                                }
                            }
                            { export_buttons(link, Tab::SendFiles) }
                        </>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn text_input(
    label: &str,
    value: &str,
    input_type: &'static str,
    placeholder: &'static str,
    on_change: Callback<String>,
) -> Html {
    html! {
        <div class="col-md-4">
            <label class="form-label-modern">{ label }</label>
            <input
                type={input_type}
                class="form-control-modern"
                placeholder={placeholder}
                value={value.to_string()}
                oninput={Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    on_change.emit(input.value());
                })}
            />
        </div>
    }
}

fn build_parameters_tab(component: &ConsoleComponent, link: &Scope<ConsoleComponent>) -> Html {
    html! {
        <div class="tab-pane show active">
            <div class="modern-controls-section">
                <h4 class="mb-4">{"System Parameters"}</h4>
                { build_sites_section(component, link) }
                { build_users_section(component, link) }
                { build_password_section(component, link) }
                { build_logs_section(component, link) }
            </div>
        </div>
    }
}

fn build_sites_section(component: &ConsoleComponent, link: &Scope<ConsoleComponent>) -> Html {
    html! {
        <details class="accordion-item">
            <summary class="accordion-header"><strong>{"Sites Management"}</strong></summary>
            <div class="accordion-body">
                <p>{"Please fill the fields below to create a new site."}</p>
                <form class="form-modern" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                    <div class="row">
                        { text_input("Code Site", &component.new_site.code, "text",
                            "Enter 3-letter site code", link.callback(Msg::SiteCode)) }
                        { text_input("Label Site", &component.new_site.label, "text",
                            "Enter site label", link.callback(Msg::SiteLabel)) }
                        { text_input("Prefix Site", &component.new_site.prefix, "text",
                            "Enter 2-letter prefix", link.callback(Msg::SitePrefix)) }
                    </div>
                    <div class="modern-button-group mt-4">
                        <button
                            type="button"
                            class="btn-modern btn-primary-modern"
                            onclick={link.callback(|_| Msg::SubmitNewSite)}
                        >
                            {"Create Site"}
                        </button>
                    </div>
                </form>
            </div>
        </details>
    }
}

fn build_users_section(component: &ConsoleComponent, link: &Scope<ConsoleComponent>) -> Html {
    let flag_checkbox = |label: &str, checked: bool, flag: UserFlag| -> Html {
        html! {
            <div class="form-check">
                <label class="form-check-label">
                    <input
                        class="form-check-input"
                        type="checkbox"
                        checked={checked}
                        onchange={link.callback(move |_| Msg::UserFlagToggled(flag))}
                    />
                    { label }
                </label>
            </div>
        }
    };

    html! {
        <details class="accordion-item">
            <summary class="accordion-header"><strong>{"Users Management"}</strong></summary>
            <div class="accordion-body">
                <p>{"Please fill the fields below to create a new user account."}</p>
                <form class="form-modern" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                    <div class="row">
                        <div class="col-md-6">
                            <label class="form-label-modern">{"Site"}</label>
                            <select
                                class="form-select-modern"
                                onchange={link.callback(|e: Event| {
                                    let select: HtmlSelectElement = e.target_unchecked_into();
                                    Msg::UserSite(select.value())
                                })}
                            >
                                <option value="" selected={component.new_user.site.is_empty()}>
                                    {"Select a site"}
                                </option>
                                {
                                    for component.sites.iter().map(|site| html! {
                                        <option
                                            value={site.clone()}
                                            selected={*site == component.new_user.site}
                                        >
                                            { site }
                                        </option>
                                    })
                                }
                            </select>
                        </div>
                        { text_input("Email", &component.new_user.email, "email",
                            "Enter user email", link.callback(Msg::UserEmail)) }
                        { text_input("Password", &component.new_user.password, "password",
                            "Enter user password", link.callback(Msg::UserPassword)) }
                    </div>
                    <div class="mt-4">
                        <label class="form-label-modern">{"Select the tab(s) to display"}</label>
                        <div class="row">
                            <div class="col-md-6">
                                { flag_checkbox("Show Display metadata",
                                    component.new_user.show_display, UserFlag::Display) }
                                { flag_checkbox("Show Create/Update metadata",
                                    component.new_user.show_create_update, UserFlag::CreateUpdate) }
                                { flag_checkbox("Show Send files to ODS",
                                    component.new_user.show_send_file, UserFlag::SendFile) }
                            </div>
                            <div class="col-md-6">
                                { flag_checkbox("Show Job numbers management",
                                    component.new_user.show_jobnumbers_management, UserFlag::JobNumbers) }
                                { flag_checkbox("Show Parameters",
                                    component.new_user.show_parameters, UserFlag::Parameters) }
                            </div>
                        </div>
                    </div>
                    <div class="modern-button-group mt-4">
                        <button
                            type="button"
                            class="btn-modern btn-primary-modern"
                            onclick={link.callback(|_| Msg::SubmitNewUser)}
                        >
                            {"Create User"}
                        </button>
                    </div>
                </form>
            </div>
        </details>
    }
}

fn build_password_section(component: &ConsoleComponent, link: &Scope<ConsoleComponent>) -> Html {
    html! {
        <details class="accordion-item">
            <summary class="accordion-header"><strong>{"Change Password"}</strong></summary>
            <div class="accordion-body">
                <form class="form-modern" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                    <div class="row">
                        { text_input("Email", &component.pwd_email, "email",
                            "Enter user email", link.callback(Msg::PwdEmail)) }
                        { text_input("New Password", &component.pwd_new_password, "password",
                            "Enter new password", link.callback(Msg::PwdNewPassword)) }
                    </div>
                    <div class="modern-button-group mt-4">
                        <button
                            type="button"
                            class="btn-modern btn-primary-modern"
                            onclick={link.callback(|_| Msg::SubmitPasswordChange)}
                        >
                            {"Change Password"}
                        </button>
                    </div>
                </form>
            </div>
        </details>
    }
}

fn build_logs_section(component: &ConsoleComponent, link: &Scope<ConsoleComponent>) -> Html {
    let filtered = log::filter(&component.logs, &component.log_query);

    html! {
        <details class="accordion-item">
            <summary class="accordion-header"><strong>{"System Logs"}</strong></summary>
            <div class="accordion-body">
                <p>{"View and export system activity logs."}</p>
                <div class="row">
                    { text_input("Filter by User", &component.log_query.user, "text",
                        "Enter username...", link.callback(Msg::LogUserFilter)) }
                    { text_input("Filter by Action", &component.log_query.action, "text",
                        "Enter action...", link.callback(Msg::LogActionFilter)) }
                    { text_input("Filter by Date", &component.log_query.date, "date",
                        "", link.callback(Msg::LogDateFilter)) }
                </div>
                <div class="modern-button-group mt-3 mb-4">
                    <button
                        type="button"
                        class="btn-modern btn-secondary-modern"
                        onclick={link.callback(|_| Msg::ClearLogFilters)}
                    >
                        {"Clear Filters"}
                    </button>
                    <button
                        type="button"
                        class="btn-modern btn-secondary-modern"
                        onclick={link.callback(|_| Msg::ReloadLogs)}
                    >
                        {"Reload"}
                    </button>
                    <button
                        type="button"
                        class="btn-modern btn-info-modern"
                        onclick={link.callback(|_| Msg::ExportLogsCsv)}
                    >
                        {"Export Logs to CSV"}
                    </button>
                </div>
                { results_table(
                    vec!["User".to_string(), "Action".to_string(), "Date".to_string()],
                    filtered
                        .iter()
                        .map(|entry| vec![
                            entry.user.clone(),
                            entry.action.clone(),
                            entry.display_date(),
                        ])
                        .collect(),
                ) }
            </div>
        </details>
    }
}

fn build_help_tab(component: &ConsoleComponent, link: &Scope<ConsoleComponent>) -> Html {
    html! {
        <div class="tab-pane show active">
            <div class="modern-controls-section">
                <h4 class="mb-4">{"Help Assistant"}</h4>
                <div class="chat-history">
                    {
                        for component.chat_history.iter().map(|message| html! {
                            <div class={if message.from_user { "chat-message user" } else { "chat-message bot" }}>
                                <strong>{ if message.from_user { "You" } else { "Assistant" } }</strong>
                                <p style="white-space: pre-line;">{ &message.text }</p>
                            </div>
                        })
                    }
                    {
                        if component.chat_busy {
                            html! { <p class="text-muted">{"The assistant is typing..."}</p> }
                        } else {
                            html! {}
                        }
                    }
                </div>
                <div class="row mt-3">
                    <div class="col-10">
                        <input
                            type="text"
                            class="form-control-modern"
                            placeholder="Ask a question about the console..."
                            value={component.chat_input.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                Msg::ChatInput(input.value())
                            })}
                            onkeydown={link.batch_callback(|e: KeyboardEvent| {
                                (e.key() == "Enter").then_some(Msg::SendChat)
                            })}
                        />
                    </div>
                    <div class="col-2">
                        <button
                            class="btn-modern btn-primary-modern"
                            type="button"
                            disabled={component.chat_busy}
                            onclick={link.callback(|_| Msg::SendChat)}
                        >
                            {"Send"}
                        </button>
                    </div>
                </div>
                {
                    if component.chat_history.is_empty() {
                        html! {}
                    } else {
                        html! {
                            <div class="modern-button-group mt-3">
                                <button
                                    class="btn-modern btn-info-modern"
                                    type="button"
                                    onclick={link.callback(|_| Msg::ExportChat)}
                                >
                                    {"Export Chat History"}
                                </button>
                            </div>
                        }
                    }
                }
            </div>
        </div>
    }
}
