use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::shared::config::{load_config, Config};
use crate::shared::notify::{NotificationHost, ToastService};
use crate::shared::theme::ThemeProvider;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Everything below the loaded configuration
#[component]
fn MainLayout(config: Config) -> impl IntoView {
    provide_context(ToastService::new(config.notifications.toast_timeout_ms));
    provide_context(config);

    let ctx = AppGlobalContext::new();
    provide_context(ctx);
    ctx.init_router_integration();

    view! {
        <Shell />
        <NotificationHost />
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (config, set_config) = signal(None::<Config>);

    spawn_local(async move {
        let loaded = load_config().await.unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        });
        set_config.set(Some(loaded));
    });

    view! {
        <ThemeProvider>
            {move || match config.get() {
                Some(config) => view! { <MainLayout config=config /> }.into_any(),
                None => view! {
                    <div class="app-loading">
                        <Spinner />
                    </div>
                }
                .into_any(),
            }}
        </ThemeProvider>
    }
}
