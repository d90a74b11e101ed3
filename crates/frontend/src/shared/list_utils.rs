/// Поиск по списку: подсветка совпадений и поле ввода с задержкой
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const DEBOUNCE_MS: u32 = 250;

/// Splits `text` into (segment, is_match) pairs, case-insensitive
pub fn match_segments(text: &str, filter: &str) -> Vec<(String, bool)> {
    let needle = filter.trim().to_lowercase();
    let lower = text.to_lowercase();
    // lowercasing may change byte lengths; fall back to no highlight then
    if needle.is_empty() || lower.len() != text.len() {
        return vec![(text.to_string(), false)];
    }

    let mut parts = Vec::new();
    let mut last = 0;
    while let Some(pos) = lower[last..].find(&needle) {
        let start = last + pos;
        let end = start + needle.len();
        if start > last {
            parts.push((text[last..start].to_string(), false));
        }
        parts.push((text[start..end].to_string(), true));
        last = end;
    }
    if last < text.len() {
        parts.push((text[last..].to_string(), false));
    }
    parts
}

/// Подсветка совпадений в тексте ячейки
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    match_segments(text, filter)
        .into_iter()
        .map(|(segment, hit)| {
            if hit {
                view! { <mark class="search-hit">{segment}</mark> }.into_any()
            } else {
                view! { <span>{segment}</span> }.into_any()
            }
        })
        .collect_view()
        .into_any()
}

/// Поле поиска с задержкой и кнопкой очистки
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let input_value = RwSignal::new(value.get_untracked());
    // dropping a pending Timeout cancels it
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input = move |text: String| {
        input_value.set(text.clone());
        let timeout = Timeout::new(DEBOUNCE_MS, move || on_change.run(text));
        pending.set_value(Some(timeout));
    };

    let clear = move |_| {
        pending.set_value(None);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <span class="search-input__icon">{crate::shared::icons::icon_sized("search", 16)}</span>
            <input
                type="text"
                class=move || {
                    if value.get().trim().is_empty() {
                        "search-input__field"
                    } else {
                        "search-input__field search-input__field--active"
                    }
                }
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" title="Clear" on:click=clear>
                    {crate::shared::icons::icon_sized("x", 14)}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_segments_case_insensitive() {
        let parts = match_segments("Buckwheat and Wheat", "WHEAT");
        assert_eq!(
            parts,
            vec![
                ("Buck".to_string(), false),
                ("wheat".to_string(), true),
                (" and ".to_string(), false),
                ("Wheat".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_match_segments_empty_filter() {
        assert_eq!(match_segments("Rice", "  "), vec![("Rice".to_string(), false)]);
    }
}
