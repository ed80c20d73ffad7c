//! HTTP handlers

pub mod health;
pub mod catalog;
pub mod items;
pub mod categories;
pub mod uploads;
