//! User-facing notifications.
//!
//! Components talk to an injectable `Notifier` instead of a process-wide
//! singleton, so the toast rendering can be swapped out without touching the
//! update logic. The default implementation injects a styled `div` into the
//! DOM and removes it after a per-kind duration.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    fn background(self) -> &'static str {
        match self {
            NotificationKind::Success => "#2e7d32",
            NotificationKind::Error => "#c62828",
            NotificationKind::Warning => "#ef6c00",
            NotificationKind::Info => "#1565c0",
        }
    }

    fn duration_ms(self) -> u32 {
        match self {
            NotificationKind::Error => 7000,
            NotificationKind::Warning => 6000,
            _ => 5000,
        }
    }
}

/// Notification sink handed to every component.
pub trait Notifier {
    fn notify(&self, kind: NotificationKind, message: &str, title: &str);

    fn success(&self, message: &str, title: &str) {
        self.notify(NotificationKind::Success, message, title);
    }

    fn error(&self, message: &str, title: &str) {
        self.notify(NotificationKind::Error, message, title);
    }

    fn warning(&self, message: &str, title: &str) {
        self.notify(NotificationKind::Warning, message, title);
    }

    fn info(&self, message: &str, title: &str) {
        self.notify(NotificationKind::Info, message, title);
    }
}

/// Default notifier: a temporary toast at the bottom of the viewport.
pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify(&self, kind: NotificationKind, message: &str, title: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
            return;
        };

        toast.set_inner_html(&format!(
            "<strong>{}</strong><br/>{}",
            escape(title),
            escape(message)
        ));
        let html_toast: HtmlElement = toast.unchecked_into();
        let style = html_toast.style();
        style.set_property("position", "fixed").ok();
        style.set_property("bottom", "20px").ok();
        style.set_property("left", "50%").ok();
        style.set_property("transform", "translateX(-50%)").ok();
        style.set_property("background", kind.background()).ok();
        style.set_property("color", "#fff").ok();
        style.set_property("padding", "10px 20px").ok();
        style.set_property("border-radius", "4px").ok();
        style.set_property("z-index", "10000").ok();
        style.set_property("font-family", "Arial, sans-serif").ok();

        if body.append_child(&html_toast).is_ok() {
            let duration = kind.duration_ms();
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(duration).await;
                if let Some(parent) = html_toast.parent_node() {
                    parent.remove_child(&html_toast).ok();
                }
            });
        }
    }
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
