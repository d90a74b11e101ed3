use std::future::Future;

use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::controller::PanelController;
use crate::shared::api_utils::api_base;
use crate::shared::config::Config;
use crate::shared::date_utils::today;
use crate::shared::gateway::HttpGateway;
use crate::shared::notify::{use_toasts, ToastService};

pub type HttpPanel<R> = PanelController<R, HttpGateway<R>, ToastService>;

/// Reactive handle to a panel controller.
///
/// The controller lives in a local `StoredValue`; `revision` is bumped on
/// every state change so views re-render after calling `track()`.
pub struct PanelHandle<R: 'static> {
    ctrl: StoredValue<HttpPanel<R>, LocalStorage>,
    revision: RwSignal<u64>,
}

impl<R: 'static> Clone for PanelHandle<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: 'static> Copy for PanelHandle<R> {}

impl<R: AggregateRoot> PanelHandle<R> {
    /// Tracked read of the controller
    pub fn read<T>(&self, f: impl FnOnce(&HttpPanel<R>) -> T) -> T {
        self.revision.track();
        self.ctrl.with_value(f)
    }

    /// Untracked access, for event handlers
    pub fn with<T>(&self, f: impl FnOnce(&HttpPanel<R>) -> T) -> T {
        self.ctrl.with_value(f)
    }

    /// Runs an async controller operation on the UI task queue
    pub fn spawn<F, Fut>(&self, f: F)
    where
        F: FnOnce(HttpPanel<R>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        let ctrl = self.ctrl.get_value();
        spawn_local(f(ctrl));
    }

    pub fn reload(&self) {
        self.spawn(|ctrl| async move {
            ctrl.load_list().await;
        });
    }
}

/// Builds the controller for `R` against the configured backend
pub fn use_panel<R: AggregateRoot>() -> PanelHandle<R> {
    let config = use_context::<Config>().unwrap_or_default();
    let gateway = HttpGateway::<R>::new(api_base(&config));
    let ctrl = PanelController::new(gateway, use_toasts(), today());

    let revision = RwSignal::new(0u64);
    ctrl.set_on_change(move || {
        revision.try_update(|r| *r += 1);
    });

    PanelHandle {
        ctrl: StoredValue::new_local(ctrl),
        revision,
    }
}
