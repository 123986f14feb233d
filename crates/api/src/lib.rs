//! `parklot-api` — HTTP surface for the parking service.

pub mod app;
