//! Tests for HTTP controller endpoints.
//!
//! These call the Axum handlers directly with an [`AppState`] built from the
//! in-memory test database and a memory-backed session, asserting on the
//! response status codes and on the rows left behind in the store.
//!
//! [`AppState`]: launchpad::server::model::app::AppState

mod auth;
mod hardware;
mod legal;
mod project;
mod risk;
mod task;
mod user;
