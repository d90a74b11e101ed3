//! Notification and confirmation surface.
//!
//! Success/info/warning messages are toasts that dismiss themselves, errors
//! are a centered dialog closed by the user, and confirmations resolve to
//! `false` unless the user explicitly accepts.

mod view;

use async_trait::async_trait;
use futures::channel::oneshot;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub use view::NotificationHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NotifyKind {
    /// Errors stay until dismissed
    pub fn auto_dismiss(&self) -> bool {
        !matches!(self, Self::Error)
    }

    pub fn css_modifier(&self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Info => "toast--info",
            Self::Warning => "toast--warning",
            Self::Error => "toast--error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Info => "info",
            Self::Warning => "alert-triangle",
            Self::Error => "x-circle",
        }
    }
}

/// Capability the panel controller talks to
#[async_trait(?Send)]
pub trait Notifier {
    fn notify(&self, kind: NotifyKind, title: &str, message: &str);

    /// Blocking yes/no question; dismissing counts as "no"
    async fn confirm(&self, title: &str, message: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: NotifyKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
}

/// Reactive notification state, provided once at the root
#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    error_dialog: RwSignal<Option<Dialog>>,
    confirm_dialog: RwSignal<Option<Dialog>>,
    pending: StoredValue<Option<oneshot::Sender<bool>>, LocalStorage>,
    next_id: StoredValue<u64>,
    timeout_ms: u32,
}

impl ToastService {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            error_dialog: RwSignal::new(None),
            confirm_dialog: RwSignal::new(None),
            pending: StoredValue::new_local(None),
            next_id: StoredValue::new(1),
            timeout_ms,
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.get()
    }

    pub fn error_dialog(&self) -> Option<Dialog> {
        self.error_dialog.get()
    }

    pub fn confirm_dialog(&self) -> Option<Dialog> {
        self.confirm_dialog.get()
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }

    pub fn close_error(&self) {
        self.error_dialog.set(None);
    }

    /// Resolve the open confirmation
    pub fn answer(&self, confirmed: bool) {
        self.confirm_dialog.set(None);
        let mut sender = None;
        self.pending.update_value(|slot| sender = slot.take());
        if let Some(sender) = sender {
            let _ = sender.send(confirmed);
        }
    }

    fn push_toast(&self, kind: NotifyKind, title: &str, message: &str) {
        let mut id = 0;
        self.next_id.update_value(|next| {
            id = *next;
            *next += 1;
        });
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                kind,
                title: title.to_string(),
                message: message.to_string(),
            })
        });

        let service = *self;
        let timeout = self.timeout_ms;
        spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            service.toasts.try_update(|list| list.retain(|t| t.id != id));
        });
    }
}

#[async_trait(?Send)]
impl Notifier for ToastService {
    fn notify(&self, kind: NotifyKind, title: &str, message: &str) {
        match kind {
            NotifyKind::Error => {
                log::error!("{}: {}", title, message);
                self.error_dialog.set(Some(Dialog {
                    title: title.to_string(),
                    message: message.to_string(),
                }));
            }
            _ => self.push_toast(kind, title, message),
        }
    }

    async fn confirm(&self, title: &str, message: &str) -> bool {
        let (sender, receiver) = oneshot::channel();
        let mut previous = None;
        self.pending
            .update_value(|slot| previous = slot.replace(sender));
        // an unanswered older question is treated as cancelled
        if let Some(previous) = previous {
            let _ = previous.send(false);
        }
        self.confirm_dialog.set(Some(Dialog {
            title: title.to_string(),
            message: message.to_string(),
        }));
        receiver.await.unwrap_or(false)
    }
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_errors_are_sticky() {
        assert!(NotifyKind::Success.auto_dismiss());
        assert!(NotifyKind::Info.auto_dismiss());
        assert!(NotifyKind::Warning.auto_dismiss());
        assert!(!NotifyKind::Error.auto_dismiss());
    }

    #[test]
    fn test_css_modifiers_are_distinct() {
        let all = [
            NotifyKind::Success,
            NotifyKind::Info,
            NotifyKind::Warning,
            NotifyKind::Error,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.css_modifier(), b.css_modifier());
            }
        }
    }
}
