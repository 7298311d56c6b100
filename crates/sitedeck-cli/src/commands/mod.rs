//! Command handlers

pub mod config;
pub mod link;
pub mod prefs;
pub mod site;
