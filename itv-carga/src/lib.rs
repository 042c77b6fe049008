//! Data loading page: pick sources, trigger an ingestion run, show what got
//! accepted, repaired and rejected. Can also wipe the backend store.

pub mod errors;
pub mod config;
pub mod types;
pub mod sources;
pub mod view;
pub mod api;
pub mod ctx;
pub mod tmpl;
pub mod html;
