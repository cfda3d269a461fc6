use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_USER_ID_KEY: &str = "launchpad:user:id";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserId(pub i32);

impl SessionUserId {
    /// Insert user ID into session
    pub async fn insert(session: &Session, user_id: i32) -> Result<(), Error> {
        session
            .insert(SESSION_USER_ID_KEY, SessionUserId(user_id))
            .await?;

        Ok(())
    }

    /// Get user ID from session
    pub async fn get(session: &Session) -> Result<Option<i32>, Error> {
        Ok(session
            .get::<SessionUserId>(SESSION_USER_ID_KEY)
            .await?
            .map(|SessionUserId(id)| id))
    }
}

#[cfg(test)]
mod tests {
    use launchpad_test_utils::prelude::*;

    use super::SessionUserId;

    /// Expect a stored user id to round-trip through the session
    #[tokio::test]
    async fn stored_id_round_trips() -> Result<(), TestError> {
        let test = test_setup!()?;

        SessionUserId::insert(&test.session, 7).await.unwrap();

        assert_eq!(SessionUserId::get(&test.session).await.unwrap(), Some(7));

        Ok(())
    }

    /// Expect None from a session that never saw a login
    #[tokio::test]
    async fn empty_session_yields_none() -> Result<(), TestError> {
        let test = test_setup!()?;

        assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

        Ok(())
    }
}
