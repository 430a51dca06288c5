//! Toast Tray Component
//!
//! Renders transient notifications pushed through the app context;
//! each toast dismisses itself after a few seconds or on click.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, Toast, ToastKind};

const DISMISS_AFTER_MS: u32 = 4_000;

#[component]
pub fn ToastTray() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toast-tray">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    spawn_local(async move {
                        TimeoutFuture::new(DISMISS_AFTER_MS).await;
                        ctx.dismiss_toast(id);
                    });
                    let class = match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    };
                    view! {
                        <div class=class on:click=move |_| ctx.dismiss_toast(id)>
                            {toast.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
