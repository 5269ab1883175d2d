//! cookbot - recipe lookup and meal suggestions for chat bots

pub mod bot;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod message;
pub mod picker;
pub mod recipe;
pub mod schedule;
pub mod store;
pub mod telemetry;
