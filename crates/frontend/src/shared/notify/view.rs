use leptos::prelude::*;
use thaw::*;

use super::{use_toasts, NotifyKind};
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;

/// Toast stack, error dialog and confirmation dialog
#[component]
pub fn NotificationHost() -> impl IntoView {
    let service = use_toasts();

    let toasts = move || {
        service
            .toasts()
            .into_iter()
            .map(|toast| {
                let id = toast.id;
                view! {
                    <div class=format!("toast {}", toast.kind.css_modifier()) role="status">
                        <span class="toast__icon">{icon(toast.kind.icon())}</span>
                        <div class="toast__body">
                            <div class="toast__title">{toast.title}</div>
                            <div class="toast__message">{toast.message}</div>
                        </div>
                        <button class="toast__close" on:click=move |_| service.dismiss(id)>
                            "×"
                        </button>
                    </div>
                }
            })
            .collect_view()
    };

    let error_dialog = move || {
        service.error_dialog().map(|dialog| {
            view! {
                <ModalFrame
                    on_close=Callback::new(move |_| service.close_error())
                    modal_class="modal--dialog"
                    z_index=2000
                >
                    <div class="modal-header">
                        <span class="dialog__icon dialog__icon--error">
                            {icon(NotifyKind::Error.icon())}
                        </span>
                        <h3 class="modal-title">{dialog.title}</h3>
                    </div>
                    <p class="dialog__message">{dialog.message}</p>
                    <Flex justify=FlexJustify::End>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| service.close_error()
                        >
                            "OK"
                        </Button>
                    </Flex>
                </ModalFrame>
            }
        })
    };

    let confirm_dialog = move || {
        service.confirm_dialog().map(|dialog| {
            view! {
                <ModalFrame
                    on_close=Callback::new(move |_| service.answer(false))
                    modal_class="modal--dialog"
                    z_index=2000
                >
                    <div class="modal-header">
                        <span class="dialog__icon dialog__icon--warning">
                            {icon(NotifyKind::Warning.icon())}
                        </span>
                        <h3 class="modal-title">{dialog.title}</h3>
                    </div>
                    <p class="dialog__message">{dialog.message}</p>
                    <Flex justify=FlexJustify::End>
                        <Button on_click=move |_| service.answer(false)>"Cancel"</Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| service.answer(true)
                        >
                            "Yes, delete it!"
                        </Button>
                    </Flex>
                </ModalFrame>
            }
        })
    };

    view! {
        <div class="toast-stack">{toasts}</div>
        {error_dialog}
        {confirm_dialog}
    }
}
