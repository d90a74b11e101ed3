use contracts::domain::common::AggregateRoot;
use contracts::shared::form::ImageUpload;
use contracts::shared::metadata::{FieldKind, FieldSpec};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

use super::handle::PanelHandle;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;

/// Reads the first selected file of an `<input type="file">`
async fn read_upload(input: HtmlInputElement) -> Result<Option<ImageUpload>, String> {
    let Some(file) = input.files().and_then(|list| list.get(0)) else {
        return Ok(None);
    };
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(Some(ImageUpload {
        file_name: file.name(),
        mime: file.type_(),
        bytes,
    }))
}

fn field_input<R: AggregateRoot>(panel: PanelHandle<R>, spec: &'static FieldSpec) -> impl IntoView {
    let name = spec.name;
    let is_key = name == R::descriptor().key_field;
    let required = move || {
        panel.read(|c| {
            c.state()
                .form
                .as_ref()
                .is_some_and(|f| f.mode.requires(spec))
        })
    };
    let value = move || {
        panel.read(|c| {
            c.state()
                .form
                .as_ref()
                .map(|f| f.values.get(name).to_string())
                .unwrap_or_default()
        })
    };
    let locked = move || is_key && panel.read(|c| c.state().form.as_ref().is_some_and(|f| f.mode.is_edit()));
    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        panel.with(|c| c.set_field(name, text));
    };

    let control = match spec.kind {
        FieldKind::Choice(options) => view! {
            <select class="form__select" id=name prop:value=value on:change=on_input>
                <option value="">{format!("Select {}", spec.label)}</option>
                {options
                    .iter()
                    .map(|o| view! { <option value=*o>{*o}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::LongText => view! {
            <textarea class="form__input" id=name rows="4" prop:value=value on:input=on_input></textarea>
        }
        .into_any(),
        FieldKind::Image => {
            let selected = move || {
                panel.read(|c| {
                    c.state()
                        .form
                        .as_ref()
                        .and_then(|f| f.values.image(name).map(|u| u.file_name.clone()))
                })
            };
            let on_file = move |ev: leptos::ev::Event| {
                let Some(input) = ev
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                panel.spawn(move |c| async move {
                    match read_upload(input).await {
                        Ok(upload) => c.set_image(name, upload),
                        Err(e) => log::error!("{}: {}", name, e),
                    }
                });
            };
            view! {
                <input class="form__input" id=name type="file" accept="image/*" on:change=on_file />
                <div class="form__hint">
                    {move || match selected() {
                        Some(file) => format!("Selected: {}", file),
                        None if !required() => "Leave empty to keep the current image".to_string(),
                        None => String::new(),
                    }}
                </div>
            }
            .into_any()
        }
        kind => view! {
            <input
                class="form__input"
                id=name
                type=kind.input_type()
                step=matches!(kind, FieldKind::Number).then_some("any")
                prop:value=value
                prop:disabled=locked
                on:input=on_input
            />
        }
        .into_any(),
    };

    view! {
        <div class="form__group">
            <label class="form__label" for=name>
                {spec.label}
                {move || required().then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            {control}
        </div>
    }
}

/// Create/edit popup
pub fn form_modal<R: AggregateRoot>(panel: PanelHandle<R>) -> impl IntoView {
    let mode = Memo::new(move |_| panel.read(|c| c.state().form.as_ref().map(|f| f.mode.clone())));
    let submitting = Memo::new(move |_| {
        panel.read(|c| c.state().form.as_ref().is_some_and(|f| f.submitting))
    });

    let close = Callback::new(move |_| panel.with(|c| c.close_form()));
    let submit = move || {
        panel.spawn(|c| async move {
            c.submit_form().await;
        })
    };

    let title = move || {
        mode.get()
            .map(|m| m.title(R::element_name()))
            .unwrap_or_default()
    };
    let submit_label = move || match mode.get() {
        Some(m) if submitting.get() => m.busy_label(),
        Some(m) => m.submit_label(),
        None => "",
    };

    view! {
        <ModalFrame on_close=close close_on_overlay=false modal_class="modal--form">
            <div class="modal-header">
                <h3 class="modal-title">{title}</h3>
                <button class="modal-close" on:click=move |_| close.run(())>{icon("x")}</button>
            </div>
            <form
                class="form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                {R::descriptor()
                    .fields
                    .iter()
                    .map(|spec| field_input(panel, spec))
                    .collect_view()}
                <div class="form-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        button_type=ButtonType::Button
                        disabled=Signal::derive(move || submitting.get())
                        on_click=move |_| close.run(())
                    >
                        "Cancel"
                    </Button>
                    // the form's submit event is the only submit path
                    <Button
                        appearance=ButtonAppearance::Primary
                        button_type=ButtonType::Submit
                        disabled=Signal::derive(move || submitting.get())
                    >
                        <Show when=move || submitting.get()>
                            <Spinner size=SpinnerSize::Small />
                        </Show>
                        {submit_label}
                    </Button>
                </div>
            </form>
        </ModalFrame>
    }
}
