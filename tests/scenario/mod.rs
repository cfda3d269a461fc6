//! End-to-end launch coordination scenarios exercised through the service
//! layer.

mod launch;
