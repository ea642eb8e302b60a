//! Interactions Server
//!
//! Receives signed slash-command webhooks, routes them to registered handlers,
//! and manages the application's remote command catalog.

pub mod api;
pub mod commands;
pub mod config;
pub mod interactions;
pub mod rest;

#[cfg(test)]
mod testing;
