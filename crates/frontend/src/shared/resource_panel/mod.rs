//! Generic CRUD panel: one instance per resource type.

pub mod chart;
pub mod controller;
mod details;
mod form;
mod handle;
mod report;
mod view;

pub use controller::{
    filter_records, DeleteOutcome, DetailState, FormState, ListStatus, LoadOutcome,
    PanelController, PanelState, SubmitOutcome,
};
pub use handle::{use_panel, HttpPanel, PanelHandle};
pub use view::resource_panel;
