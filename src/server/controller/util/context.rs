use tower_sessions::Session;

use crate::server::{
    error::Error,
    model::{app::AppState, context::RequestContext},
    service::auth::AuthService,
};

/// Resolves the request context (user id + role) from the session.
///
/// Every protected endpoint calls this before doing anything else; role and
/// profile data are re-read from the database so an admin role change
/// applies on the next request.
///
/// # Returns
/// - `Ok(RequestContext)` - Authenticated caller with their current role
/// - `Err(Error::AuthError)` - No session, or the session's user no longer
///   exists (the stale session is cleared)
pub async fn get_context(state: &AppState, session: &Session) -> Result<RequestContext, Error> {
    AuthService::new(&state.db).resolve_context(session).await
}
