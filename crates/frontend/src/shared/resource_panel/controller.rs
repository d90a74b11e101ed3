//! Panel controller: owns one resource's loaded list, form and detail state.
//!
//! The controller is UI-agnostic. Views read snapshots through the accessors
//! and get a callback after every state change; all remote work goes through
//! a [`ResourceGateway`] and every user-facing outcome through a [`Notifier`].

use std::cell::{Cell, Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::NaiveDate;
use contracts::domain::common::AggregateRoot;
use contracts::shared::error::{GatewayError, DETAILS_FAILURE_MESSAGE};
use contracts::shared::form::{FormMode, FormValues, ImageUpload};
use contracts::shared::payload::Payload;
use contracts::shared::report::{AggregateReport, ReportSpec, SummaryLine};
use contracts::shared::stats::StatItem;

use crate::shared::gateway::ResourceGateway;
use crate::shared::notify::{Notifier, NotifyKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    Loading,
    Loaded,
    /// The table is emptied and shows a retry prompt
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was started while this one was in flight
    Stale,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    Invalid,
    Failed(GatewayError),
    NotOpen,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    Failed(GatewayError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub mode: FormMode,
    pub values: FormValues,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<R> {
    Loading(String),
    Ready(R),
}

#[derive(Debug)]
pub struct PanelState<R> {
    pub records: Vec<R>,
    /// Bumped whenever `records` is replaced
    pub version: u64,
    pub list_status: ListStatus,
    pub filter: String,
    pub facets: BTreeMap<&'static str, String>,
    pub form: Option<FormState>,
    pub detail: Option<DetailState<R>>,
    pub today: NaiveDate,
}

struct Inner<R, G, N> {
    gateway: G,
    notifier: N,
    state: RefCell<PanelState<R>>,
    load_seq: Cell<u64>,
    on_change: RefCell<Option<Box<dyn Fn()>>>,
}

pub struct PanelController<R, G, N> {
    inner: Rc<Inner<R, G, N>>,
}

impl<R, G, N> Clone for PanelController<R, G, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R, G, N> PanelController<R, G, N>
where
    R: AggregateRoot,
    G: ResourceGateway<R>,
    N: Notifier,
{
    pub fn new(gateway: G, notifier: N, today: NaiveDate) -> Self {
        Self {
            inner: Rc::new(Inner {
                gateway,
                notifier,
                state: RefCell::new(PanelState {
                    records: Vec::new(),
                    version: 0,
                    list_status: ListStatus::Idle,
                    filter: String::new(),
                    facets: BTreeMap::new(),
                    form: None,
                    detail: None,
                    today,
                }),
                load_seq: Cell::new(0),
                on_change: RefCell::new(None),
            }),
        }
    }

    /// Called after every state change
    pub fn set_on_change(&self, hook: impl Fn() + 'static) {
        *self.inner.on_change.borrow_mut() = Some(Box::new(hook));
    }

    pub fn state(&self) -> Ref<'_, PanelState<R>> {
        self.inner.state.borrow()
    }

    fn mutate(&self, f: impl FnOnce(&mut PanelState<R>)) {
        f(&mut self.inner.state.borrow_mut());
        if let Some(hook) = self.inner.on_change.borrow().as_ref() {
            hook();
        }
    }

    fn notify(&self, kind: NotifyKind, title: &str, message: &str) {
        self.inner.notifier.notify(kind, title, message);
    }

    // ------------------------------------------------------------------
    // List
    // ------------------------------------------------------------------

    /// Replaces the record set wholesale; responses of superseded loads are dropped
    pub async fn load_list(&self) -> LoadOutcome {
        let seq = self.inner.load_seq.get() + 1;
        self.inner.load_seq.set(seq);
        self.mutate(|s| s.list_status = ListStatus::Loading);

        let result = self.inner.gateway.list().await;
        if seq != self.inner.load_seq.get() {
            log::debug!(
                "{}: discarding stale list response #{}",
                R::collection_name(),
                seq
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(records) => {
                log::info!("{}: loaded {} records", R::collection_name(), records.len());
                self.mutate(|s| {
                    s.records = records;
                    s.version += 1;
                    s.list_status = ListStatus::Loaded;
                });
                LoadOutcome::Applied
            }
            Err(err) => {
                log::error!("{}: list failed: {}", R::collection_name(), err);
                self.mutate(|s| {
                    s.records.clear();
                    s.version += 1;
                    s.list_status = ListStatus::Failed(err.user_message().to_string());
                });
                self.notify(
                    NotifyKind::Error,
                    "Error",
                    &format!("Failed to load {}.", R::list_name().to_lowercase()),
                );
                LoadOutcome::Failed
            }
        }
    }

    // ------------------------------------------------------------------
    // Form
    // ------------------------------------------------------------------

    pub fn open_create_form(&self) {
        self.mutate(|s| {
            s.form = Some(FormState {
                mode: FormMode::Create,
                values: FormValues::blank(R::descriptor()),
                submitting: false,
            })
        });
    }

    /// Fetches the record and opens the form pre-populated with it
    pub async fn open_edit_form(&self, key: &str) -> Result<(), GatewayError> {
        match self.inner.gateway.get(key).await {
            Ok(record) => {
                self.mutate(|s| {
                    s.form = Some(FormState {
                        mode: FormMode::Edit(record.key().to_string()),
                        values: FormValues::from_record(&record),
                        submitting: false,
                    })
                });
                Ok(())
            }
            Err(err) => {
                log::error!("{}: get '{}' failed: {}", R::collection_name(), key, err);
                self.notify(NotifyKind::Error, "Error", err.user_message());
                Err(err)
            }
        }
    }

    pub fn set_field(&self, name: &str, value: String) {
        self.mutate(|s| {
            if let Some(form) = s.form.as_mut() {
                // the natural key is immutable once created
                if form.mode.is_edit() && name == R::descriptor().key_field {
                    return;
                }
                form.values.set(name, value);
            }
        });
    }

    pub fn set_image(&self, name: &str, upload: Option<ImageUpload>) {
        self.mutate(|s| {
            if let Some(form) = s.form.as_mut() {
                form.values.set_image(name, upload);
            }
        });
    }

    pub fn close_form(&self) {
        self.mutate(|s| {
            if s.form.as_ref().is_some_and(|f| !f.submitting) {
                s.form = None;
            }
        });
    }

    fn begin_submit(&self) -> Result<(FormMode, Payload), SubmitOutcome> {
        let mut state = self.inner.state.borrow_mut();
        let form = state.form.as_mut().ok_or(SubmitOutcome::NotOpen)?;
        if form.submitting {
            return Err(SubmitOutcome::Busy);
        }
        if let Err(err) = form.values.validate(R::descriptor(), &form.mode) {
            drop(state);
            log::warn!("{}: {}", R::collection_name(), err);
            self.notify(NotifyKind::Warning, "Validation Error", &err.to_string());
            return Err(SubmitOutcome::Invalid);
        }
        form.submitting = true;
        Ok((form.mode.clone(), Payload::build::<R>(&form.values)))
    }

    /// Validates, sends create or update, and reloads the list once on success
    pub async fn submit_form(&self) -> SubmitOutcome {
        let (mode, payload) = match self.begin_submit() {
            Ok(ready) => ready,
            Err(outcome) => return outcome,
        };
        self.mutate(|_| {});

        let result = match &mode {
            FormMode::Create => self.inner.gateway.create(&payload).await,
            FormMode::Edit(key) => self.inner.gateway.update(key, &payload).await,
        };

        match result {
            Ok(()) => {
                self.mutate(|s| s.form = None);
                let verb = if mode.is_edit() { "updated" } else { "saved" };
                self.notify(
                    NotifyKind::Success,
                    "Success",
                    &format!("{} {} successfully.", R::element_name(), verb),
                );
                self.load_list().await;
                SubmitOutcome::Saved
            }
            Err(err) => {
                log::error!("{}: submit failed: {}", R::collection_name(), err);
                self.mutate(|s| {
                    if let Some(form) = s.form.as_mut() {
                        form.submitting = false;
                    }
                });
                self.notify(NotifyKind::Error, "Error", err.user_message());
                SubmitOutcome::Failed(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Delete / detail
    // ------------------------------------------------------------------

    pub async fn delete_record(&self, key: &str) -> DeleteOutcome {
        let confirmed = self
            .inner
            .notifier
            .confirm(
                "Are you sure?",
                &format!(
                    "{} '{}' will be deleted. You won't be able to revert this!",
                    R::element_name(),
                    key
                ),
            )
            .await;
        if !confirmed {
            return DeleteOutcome::Cancelled;
        }

        match self.inner.gateway.delete(key).await {
            Ok(()) => {
                self.notify(
                    NotifyKind::Success,
                    "Deleted!",
                    &format!("{} has been deleted.", R::element_name()),
                );
                self.load_list().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                log::error!("{}: delete '{}' failed: {}", R::collection_name(), key, err);
                self.notify(NotifyKind::Error, "Error", err.user_message());
                DeleteOutcome::Failed(err)
            }
        }
    }

    /// Read-only detail popup; never touches the loaded list
    pub async fn view_record(&self, key: &str) -> Result<(), GatewayError> {
        self.mutate(|s| s.detail = Some(DetailState::Loading(key.to_string())));
        let result = self.inner.gateway.get(key).await;

        let still_waiting = matches!(
            self.state().detail.as_ref(),
            Some(DetailState::Loading(k)) if k == key
        );

        match result {
            Ok(record) => {
                if still_waiting {
                    self.mutate(|s| s.detail = Some(DetailState::Ready(record)));
                }
                Ok(())
            }
            Err(err) => {
                log::error!("{}: details '{}' failed: {}", R::collection_name(), key, err);
                if still_waiting {
                    self.mutate(|s| s.detail = None);
                }
                self.notify(NotifyKind::Error, "Error", DETAILS_FAILURE_MESSAGE);
                Err(err)
            }
        }
    }

    pub fn close_detail(&self) {
        self.mutate(|s| s.detail = None);
    }

    // ------------------------------------------------------------------
    // Client-side filtering
    // ------------------------------------------------------------------

    pub fn set_filter(&self, term: impl Into<String>) {
        let term = term.into();
        self.mutate(|s| s.filter = term);
    }

    /// `None` or an empty value clears the facet
    pub fn set_facet(&self, field: &'static str, value: Option<String>) {
        self.mutate(|s| match value.filter(|v| !v.is_empty()) {
            Some(v) => {
                s.facets.insert(field, v);
            }
            None => {
                s.facets.remove(field);
            }
        });
    }

    /// Loaded records matching the search term and every active facet
    pub fn visible_records(&self) -> Vec<R> {
        let state = self.state();
        filter_records(&state.records, &state.filter, &state.facets)
    }

    /// Choices offered by a facet dropdown
    pub fn facet_options(&self, field: &str) -> Vec<String> {
        let declared = R::descriptor()
            .field(field)
            .map(|spec| spec.kind.options())
            .unwrap_or(&[]);
        if !declared.is_empty() {
            return declared.iter().map(|o| o.to_string()).collect();
        }
        let mut seen: Vec<String> = self
            .state()
            .records
            .iter()
            .filter_map(|r| r.field_value(field))
            .filter(|v| !v.trim().is_empty())
            .collect();
        seen.sort();
        seen.dedup();
        seen
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    pub fn stats(&self) -> Vec<StatItem> {
        let state = self.state();
        R::stats(&state.records, state.today)
    }

    /// Reports are built over the full loaded list, not the filtered rows
    pub fn report(&self, id: &str) -> Option<(ReportSpec<R>, AggregateReport)> {
        let spec = R::reports().into_iter().find(|r| r.id == id)?;
        let report = spec.build(&self.state().records);
        Some((spec, report))
    }

    pub fn summary(&self) -> Vec<SummaryLine> {
        R::summary(&self.state().records)
    }
}

/// Case-insensitive substring match over the rendered text columns
pub fn filter_records<R: AggregateRoot>(
    records: &[R],
    term: &str,
    facets: &BTreeMap<&'static str, String>,
) -> Vec<R> {
    let needle = term.trim().to_lowercase();
    records
        .iter()
        .filter(|r| {
            facets
                .iter()
                .all(|(field, value)| r.field_value(field).as_deref() == Some(value.as_str()))
        })
        .filter(|r| {
            needle.is_empty()
                || R::descriptor()
                    .text_columns()
                    .any(|c| r.column_text(c).to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use contracts::domain::a001_crop::Crop;
    use contracts::domain::a005_vehicle::Vehicle;
    use contracts::shared::error::BAD_REQUEST_MESSAGE;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use serde_json::json;

    use super::*;

    type ListReply<R> = Result<Vec<R>, GatewayError>;

    struct FakeLog<R> {
        list_replies: RefCell<VecDeque<oneshot::Receiver<ListReply<R>>>>,
        get_reply: RefCell<Option<Result<R, GatewayError>>>,
        write_reply: RefCell<Result<(), GatewayError>>,
        /// When set, writes wait for it before answering
        write_gate: RefCell<Option<oneshot::Receiver<()>>>,
        list_calls: Cell<usize>,
        write_calls: Cell<usize>,
        delete_calls: Cell<usize>,
    }

    #[derive(Clone)]
    struct FakeGateway<R> {
        log: Rc<FakeLog<R>>,
    }

    impl<R> FakeGateway<R> {
        fn new() -> Self {
            Self {
                log: Rc::new(FakeLog {
                    list_replies: RefCell::new(VecDeque::new()),
                    get_reply: RefCell::new(None),
                    write_reply: RefCell::new(Ok(())),
                    write_gate: RefCell::new(None),
                    list_calls: Cell::new(0),
                    write_calls: Cell::new(0),
                    delete_calls: Cell::new(0),
                }),
            }
        }

        fn queue_list(&self, reply: ListReply<R>) {
            let (tx, rx) = oneshot::channel();
            let _ = tx.send(reply);
            self.log.list_replies.borrow_mut().push_back(rx);
        }

        fn queue_pending_list(&self) -> oneshot::Sender<ListReply<R>> {
            let (tx, rx) = oneshot::channel();
            self.log.list_replies.borrow_mut().push_back(rx);
            tx
        }
    }

    #[async_trait(?Send)]
    impl<R: AggregateRoot> ResourceGateway<R> for FakeGateway<R> {
        async fn list(&self) -> Result<Vec<R>, GatewayError> {
            self.log.list_calls.set(self.log.list_calls.get() + 1);
            let rx = self.log.list_replies.borrow_mut().pop_front();
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(GatewayError::Network("dropped".into()))),
                None => Ok(Vec::new()),
            }
        }

        async fn get(&self, key: &str) -> Result<R, GatewayError> {
            self.log
                .get_reply
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(GatewayError::NotFound { key: key.into() }))
        }

        async fn create(&self, _payload: &Payload) -> Result<(), GatewayError> {
            self.log.write_calls.set(self.log.write_calls.get() + 1);
            let gate = self.log.write_gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.log.write_reply.borrow().clone()
        }

        async fn update(&self, _key: &str, _payload: &Payload) -> Result<(), GatewayError> {
            self.log.write_calls.set(self.log.write_calls.get() + 1);
            self.log.write_reply.borrow().clone()
        }

        async fn delete(&self, _key: &str) -> Result<(), GatewayError> {
            self.log.delete_calls.set(self.log.delete_calls.get() + 1);
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct FakeNotifier {
        seen: Rc<RefCell<Vec<(NotifyKind, String)>>>,
        answer: bool,
    }

    impl FakeNotifier {
        fn kinds(&self) -> Vec<NotifyKind> {
            self.seen.borrow().iter().map(|(k, _)| *k).collect()
        }
    }

    #[async_trait(?Send)]
    impl Notifier for FakeNotifier {
        fn notify(&self, kind: NotifyKind, _title: &str, message: &str) {
            self.seen.borrow_mut().push((kind, message.to_string()));
        }

        async fn confirm(&self, _title: &str, _message: &str) -> bool {
            self.answer
        }
    }

    fn crop(code: &str, name: &str, season: &str) -> Crop {
        serde_json::from_value(json!({
            "cropCode": code,
            "commonName": name,
            "scientificName": "Sp.",
            "category": "Cereal",
            "cropSeason": season,
            "fieldCode": "F-1",
        }))
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn controller(
        answer: bool,
    ) -> (
        PanelController<Crop, FakeGateway<Crop>, FakeNotifier>,
        FakeGateway<Crop>,
        FakeNotifier,
    ) {
        let gateway = FakeGateway::new();
        let notifier = FakeNotifier {
            answer,
            ..Default::default()
        };
        let ctrl = PanelController::new(gateway.clone(), notifier.clone(), today());
        (ctrl, gateway, notifier)
    }

    #[test]
    fn test_load_replaces_records() {
        let (ctrl, gateway, _) = controller(true);
        gateway.queue_list(Ok(vec![crop("C1", "Wheat", "Spring")]));
        assert_eq!(block_on(ctrl.load_list()), LoadOutcome::Applied);
        assert_eq!(ctrl.state().records.len(), 1);
        assert_eq!(ctrl.state().list_status, ListStatus::Loaded);
    }

    #[test]
    fn test_failed_load_empties_table_and_notifies() {
        let (ctrl, gateway, notifier) = controller(true);
        gateway.queue_list(Ok(vec![crop("C1", "Wheat", "Spring")]));
        block_on(ctrl.load_list());
        gateway.queue_list(Err(GatewayError::Server { status: 500 }));

        assert_eq!(block_on(ctrl.load_list()), LoadOutcome::Failed);
        assert!(ctrl.state().records.is_empty());
        assert!(matches!(ctrl.state().list_status, ListStatus::Failed(_)));
        assert_eq!(notifier.kinds(), vec![NotifyKind::Error]);
    }

    #[test]
    fn test_invalid_submit_makes_no_call() {
        let (ctrl, gateway, notifier) = controller(true);
        ctrl.open_create_form();
        ctrl.set_field("cropCode", "C1".into());

        assert_eq!(block_on(ctrl.submit_form()), SubmitOutcome::Invalid);
        assert_eq!(gateway.log.write_calls.get(), 0);
        assert_eq!(notifier.kinds(), vec![NotifyKind::Warning]);
        let state = ctrl.state();
        let form = state.form.as_ref().unwrap();
        assert!(!form.submitting);
    }

    fn fill_crop_form(ctrl: &PanelController<Crop, FakeGateway<Crop>, FakeNotifier>) {
        ctrl.open_create_form();
        for (name, value) in [
            ("cropCode", "C9"),
            ("commonName", "Maize"),
            ("scientificName", "Zea mays"),
            ("category", "Cereal"),
            ("cropSeason", "Summer"),
            ("fieldCode", "F-2"),
        ] {
            ctrl.set_field(name, value.into());
        }
        ctrl.set_image(
            "cropImage",
            Some(ImageUpload {
                file_name: "maize.png".into(),
                mime: "image/png".into(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            }),
        );
    }

    #[test]
    fn test_successful_create_reloads_once_and_closes() {
        let (ctrl, gateway, notifier) = controller(true);
        fill_crop_form(&ctrl);
        gateway.queue_list(Ok(vec![crop("C9", "Maize", "Summer")]));

        assert_eq!(block_on(ctrl.submit_form()), SubmitOutcome::Saved);
        assert_eq!(gateway.log.write_calls.get(), 1);
        assert_eq!(gateway.log.list_calls.get(), 1);
        assert!(ctrl.state().form.is_none());
        assert_eq!(ctrl.state().records[0].crop_code, "C9");
        assert_eq!(
            *notifier.seen.borrow(),
            vec![(NotifyKind::Success, "Crop saved successfully.".to_string())]
        );
    }

    #[test]
    fn test_bad_request_shows_bad_request_message() {
        let (ctrl, gateway, notifier) = controller(true);
        fill_crop_form(&ctrl);
        *gateway.log.write_reply.borrow_mut() = Err(GatewayError::Server { status: 400 });

        assert_eq!(
            block_on(ctrl.submit_form()),
            SubmitOutcome::Failed(GatewayError::Server { status: 400 })
        );
        assert_eq!(gateway.log.list_calls.get(), 0);
        assert_eq!(
            *notifier.seen.borrow(),
            vec![(NotifyKind::Error, BAD_REQUEST_MESSAGE.to_string())]
        );
        let state = ctrl.state();
        let form = state.form.as_ref().unwrap();
        assert!(!form.submitting);
        assert_eq!(form.values.get("cropCode"), "C9");
    }

    #[test]
    fn test_second_submit_while_saving_is_busy() {
        let (ctrl, gateway, notifier) = controller(true);
        fill_crop_form(&ctrl);
        let (release, gate) = oneshot::channel();
        *gateway.log.write_gate.borrow_mut() = Some(gate);
        let outcomes = Rc::new(RefCell::new(Vec::new()));

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for _ in 0..2 {
            let ctrl = ctrl.clone();
            let outcomes = outcomes.clone();
            spawner
                .spawn_local(async move {
                    let outcome = ctrl.submit_form().await;
                    outcomes.borrow_mut().push(outcome);
                })
                .unwrap();
            pool.run_until_stalled();
        }
        let _ = release.send(());
        pool.run_until_stalled();

        assert_eq!(
            *outcomes.borrow(),
            vec![SubmitOutcome::Busy, SubmitOutcome::Saved]
        );
        assert_eq!(gateway.log.write_calls.get(), 1);
        assert_eq!(notifier.kinds(), vec![NotifyKind::Success]);
    }

    #[test]
    fn test_submit_without_form() {
        let (ctrl, _, _) = controller(true);
        assert_eq!(block_on(ctrl.submit_form()), SubmitOutcome::NotOpen);
    }

    #[test]
    fn test_successful_update_reloads_once_and_closes() {
        let (ctrl, gateway, notifier) = controller(true);
        *gateway.log.get_reply.borrow_mut() = Some(Ok(crop("C1", "Wheat", "Spring")));
        block_on(ctrl.open_edit_form("C1")).unwrap();
        ctrl.set_field("commonName", "Barley".into());
        gateway.queue_list(Ok(vec![crop("C1", "Barley", "Spring")]));

        assert_eq!(block_on(ctrl.submit_form()), SubmitOutcome::Saved);
        assert_eq!(gateway.log.write_calls.get(), 1);
        assert_eq!(gateway.log.list_calls.get(), 1);
        assert!(ctrl.state().form.is_none());
        assert_eq!(ctrl.state().records[0].common_name.as_deref(), Some("Barley"));
        assert_eq!(notifier.kinds(), vec![NotifyKind::Success]);
    }

    #[test]
    fn test_key_is_locked_in_edit_mode() {
        let (ctrl, gateway, _) = controller(true);
        *gateway.log.get_reply.borrow_mut() = Some(Ok(crop("C1", "Wheat", "Spring")));
        block_on(ctrl.open_edit_form("C1")).unwrap();
        ctrl.set_field("cropCode", "C2".into());
        let state = ctrl.state();
        assert_eq!(state.form.as_ref().unwrap().values.get("cropCode"), "C1");
    }

    #[test]
    fn test_failed_update_keeps_list_and_skips_reload() {
        let (ctrl, gateway, notifier) = controller(true);
        gateway.queue_list(Ok(vec![crop("C1", "Wheat", "Spring")]));
        block_on(ctrl.load_list());
        *gateway.log.get_reply.borrow_mut() = Some(Ok(crop("C1", "Wheat", "Spring")));
        block_on(ctrl.open_edit_form("C1")).unwrap();
        *gateway.log.write_reply.borrow_mut() = Err(GatewayError::Server { status: 404 });

        let outcome = block_on(ctrl.submit_form());
        assert_eq!(
            outcome,
            SubmitOutcome::Failed(GatewayError::Server { status: 404 })
        );
        assert_eq!(gateway.log.list_calls.get(), 1);
        assert_eq!(ctrl.state().records[0].common_name.as_deref(), Some("Wheat"));
        let state = ctrl.state();
        assert!(!state.form.as_ref().unwrap().submitting);
        assert_eq!(notifier.kinds(), vec![NotifyKind::Error]);
    }

    #[test]
    fn test_cancelled_delete_makes_no_call() {
        let (ctrl, gateway, notifier) = controller(false);
        assert_eq!(block_on(ctrl.delete_record("C1")), DeleteOutcome::Cancelled);
        assert_eq!(gateway.log.delete_calls.get(), 0);
        assert_eq!(gateway.log.list_calls.get(), 0);
        assert!(notifier.kinds().is_empty());
    }

    #[test]
    fn test_confirmed_delete_reloads() {
        let (ctrl, gateway, _) = controller(true);
        assert_eq!(block_on(ctrl.delete_record("C1")), DeleteOutcome::Deleted);
        assert_eq!(gateway.log.delete_calls.get(), 1);
        assert_eq!(gateway.log.list_calls.get(), 1);
    }

    #[test]
    fn test_view_missing_record_reports_details_failure() {
        let (ctrl, _, notifier) = controller(true);
        assert!(block_on(ctrl.view_record("nope")).is_err());
        assert!(ctrl.state().detail.is_none());
        assert_eq!(
            notifier.seen.borrow()[0].1,
            DETAILS_FAILURE_MESSAGE.to_string()
        );
    }

    #[test]
    fn test_filter_is_idempotent_and_offline() {
        let (ctrl, gateway, _) = controller(true);
        gateway.queue_list(Ok(vec![
            crop("C1", "Wheat", "Spring"),
            crop("C2", "Rice", "Fall"),
            crop("C3", "Buckwheat", "Fall"),
        ]));
        block_on(ctrl.load_list());

        ctrl.set_filter("WHEAT");
        let first: Vec<String> = ctrl.visible_records().iter().map(|c| c.crop_code.clone()).collect();
        ctrl.set_filter("WHEAT");
        let second: Vec<String> = ctrl.visible_records().iter().map(|c| c.crop_code.clone()).collect();

        assert_eq!(first, vec!["C1", "C3"]);
        assert_eq!(first, second);
        assert_eq!(gateway.log.list_calls.get(), 1);
    }

    #[test]
    fn test_facets_narrow_visible_rows() {
        let gateway = FakeGateway::<Vehicle>::new();
        let ctrl = PanelController::new(gateway.clone(), FakeNotifier::default(), today());
        let vehicle = |code: &str, status: &str| -> Vehicle {
            serde_json::from_value(json!({
                "vehicleCode": code,
                "licensePlateNumber": "AB-1",
                "vehicleCategory": "Truck",
                "fuelType": "Diesel",
                "status": status,
            }))
            .unwrap()
        };
        gateway.queue_list(Ok(vec![vehicle("V1", "Active"), vehicle("V2", "Maintenance")]));
        block_on(ctrl.load_list());

        ctrl.set_facet("status", Some("Maintenance".into()));
        assert_eq!(ctrl.visible_records().len(), 1);
        ctrl.set_facet("status", Some(String::new()));
        assert_eq!(ctrl.visible_records().len(), 2);
        assert_eq!(ctrl.facet_options("status").len(), 3);
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let (ctrl, gateway, _) = controller(true);
        let older = gateway.queue_pending_list();
        let newer = gateway.queue_pending_list();
        let outcomes = Rc::new(RefCell::new(Vec::new()));

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for _ in 0..2 {
            let ctrl = ctrl.clone();
            let outcomes = outcomes.clone();
            spawner
                .spawn_local(async move {
                    let outcome = ctrl.load_list().await;
                    outcomes.borrow_mut().push(outcome);
                })
                .unwrap();
            // each load takes its reply slot before the next one starts
            pool.run_until_stalled();
        }

        let _ = newer.send(Ok(vec![crop("NEW", "Oat", "Spring")]));
        pool.run_until_stalled();
        let _ = older.send(Ok(vec![crop("OLD", "Rye", "Fall")]));
        pool.run_until_stalled();

        assert_eq!(
            *outcomes.borrow(),
            vec![LoadOutcome::Applied, LoadOutcome::Stale]
        );
        assert_eq!(ctrl.state().records[0].crop_code, "NEW");
    }

    #[test]
    fn test_season_report_uses_loaded_list() {
        let (ctrl, gateway, _) = controller(true);
        gateway.queue_list(Ok(vec![
            crop("C1", "Wheat", "Spring"),
            crop("C2", "Oat", "Spring"),
            crop("C3", "Rye", "Fall"),
        ]));
        block_on(ctrl.load_list());
        ctrl.set_filter("rye");

        let (_, report) = ctrl.report("season").unwrap();
        assert_eq!(report.total(), 3);
        assert_eq!(report.count_of("Spring"), Some(2));
        assert!(ctrl.report("unknown").is_none());
    }

    #[test]
    fn test_change_hook_fires() {
        let (ctrl, _, _) = controller(true);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        ctrl.set_on_change(move || counter.set(counter.get() + 1));
        ctrl.open_create_form();
        ctrl.close_form();
        assert_eq!(hits.get(), 2);
        assert!(ctrl.state().form.is_none());
    }
}
