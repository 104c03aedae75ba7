//! HTTP endpoint handlers, one module per route.

pub mod actions;
pub mod health;
pub mod webhook;
