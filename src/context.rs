//! Application Context
//!
//! Shared signals provided via the Leptos Context API: the
//! authentication gate and the toast notification surface.

use std::rc::Rc;

use leptos::prelude::*;

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification shown in the toast tray
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Whether a session is active; stores no-op their fetches when false
    pub authenticated: RwSignal<bool>,
    /// Live toasts, newest last
    pub toasts: RwSignal<Vec<Toast>>,
    toast_seq: RwSignal<u32>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            authenticated: RwSignal::new(false),
            toasts: RwSignal::new(Vec::new()),
            toast_seq: RwSignal::new(0),
        }
    }

    pub fn push_toast(&self, kind: ToastKind, message: String) {
        let id = self.toast_seq.get_untracked();
        self.toast_seq.set(id + 1);
        self.toasts.update(|toasts| toasts.push(Toast { id, kind, message }));
    }

    pub fn dismiss_toast(&self, id: u32) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    /// Callback handed to the stores so they can notify without
    /// depending on the UI layer
    pub fn notifier(&self) -> Rc<dyn Fn(ToastKind, String)> {
        let ctx = *self;
        Rc::new(move |kind, message| ctx.push_toast(kind, message))
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the app context, panicking if the provider is missing
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
