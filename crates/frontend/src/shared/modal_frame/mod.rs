use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Keys that dismiss an open modal
fn is_close_key(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

/// Overlay plus centered surface. Header and actions are rendered by the caller.
///
/// The overlay takes focus when mounted, so Escape closes the modal before
/// the user clicks into it; keydowns from inputs inside bubble up to it.
#[component]
pub fn ModalFrame(
    /// Invoked on overlay click or Escape
    on_close: Callback<()>,
    /// Close when clicking on the overlay (default: true).
    #[prop(optional)]
    close_on_overlay: Option<bool>,
    /// z-index of the overlay (default: 1000).
    #[prop(optional)]
    z_index: Option<i32>,
    /// Extra class for `div.modal`
    #[prop(optional, into)]
    modal_class: Option<String>,
    children: Children,
) -> impl IntoView {
    let close_on_overlay = close_on_overlay.unwrap_or(true);
    let z_index = z_index.unwrap_or(1000);
    let pressed_on_overlay = RwSignal::new(false);
    let overlay_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move |_| {
        if let Some(overlay) = overlay_ref.get() {
            let _ = overlay.focus();
        }
    });

    let is_overlay_target = |ev: &ev::MouseEvent| match (ev.target(), ev.current_target()) {
        (Some(t), Some(ct)) => t == ct,
        _ => false,
    };

    // Both press and release must land on the overlay, so text selection
    // that ends outside the surface does not close the modal.
    let on_mouse_down = move |ev: ev::MouseEvent| {
        pressed_on_overlay.set(is_overlay_target(&ev));
    };

    let on_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = close_on_overlay && pressed_on_overlay.get() && is_overlay_target(&ev);
        pressed_on_overlay.set(false);
        if should_close {
            // next tick: the overlay is removed during its own click dispatch otherwise
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let on_key_down = move |ev: ev::KeyboardEvent| {
        if is_close_key(&ev.key()) {
            on_close.run(());
        }
    };

    let surface_class = match modal_class {
        Some(extra) => format!("modal {extra}"),
        None => "modal".to_string(),
    };

    view! {
        <div
            node_ref=overlay_ref
            class="modal-overlay"
            style=format!("z-index: {z_index};")
            tabindex="-1"
            on:mousedown=on_mouse_down
            on:click=on_overlay_click
            on:keydown=on_key_down
        >
            <div
                class=surface_class
                style="position: relative;"
                on:click=|ev: ev::MouseEvent| ev.stop_propagation()
            >
                {children()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_keys() {
        assert!(is_close_key("Escape"));
        assert!(is_close_key("Esc"));
        assert!(!is_close_key("Enter"));
        assert!(!is_close_key("e"));
    }
}
