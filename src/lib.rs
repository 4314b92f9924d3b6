//! Agent performance dashboard.
//!
//! Looks up one sales agent's forecast, tier and recommendations from a
//! prediction service, and charts how tiers and forecasts are distributed
//! across all agents. The service does the analytics; this crate shapes its
//! responses into view-models and renders them in the terminal or in an
//! embedded web dashboard.

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod events;
pub mod pages;
pub mod view_model;
pub mod web;
