pub mod api_utils;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod export;
pub mod gateway;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod notify;
pub mod page_frame;
pub mod resource_panel;
pub mod theme;
