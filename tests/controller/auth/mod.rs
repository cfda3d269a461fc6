//! Tests for authentication controller endpoints: login, logout, and the
//! current-user lookup.

mod current_user;
mod login;
mod logout;
