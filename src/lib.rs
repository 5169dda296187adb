//! Terminal viewer for tweets and the annotations people wrote about them.

pub mod app;
pub mod config;
pub mod feeds;
pub mod logging;
pub mod store;
pub mod ui;
