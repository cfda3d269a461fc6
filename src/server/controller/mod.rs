//! HTTP controller endpoints for the Launchpad web API.
//!
//! This module contains Axum handlers for authentication, user management,
//! and every launch resource. Controllers handle HTTP requests, resolve the
//! request context from the session, delegate to services, and return JSON
//! responses. They integrate with tower-sessions for session management and
//! use utoipa for OpenAPI documentation.

pub mod auth;
pub mod content;
pub mod hardware;
pub mod legal;
pub mod milestone;
pub mod pricing;
pub mod project;
pub mod reward;
pub mod risk;
pub mod runbook;
pub mod task;
pub mod user;
pub mod util;
pub mod workstream;
