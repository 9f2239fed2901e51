//! [`Command`] for authorizing a user [`Session`].

use derive_more::{Display, Error, From};
use jsonwebtoken::Validation;
use tracerr::Traced;

use crate::{
    domain::user::{session, Session},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a user [`Session`] by its [`session::Token`].
#[derive(Clone, Debug, From)]
pub struct AuthorizeUserSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

impl<Db> Command<AuthorizeUserSession> for Service<Db> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeUserSession { token } = cmd;

        Ok(jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &Validation::default(),
        )
        .map_err(tracerr::from_and_wrap!(=> E))?
        .claims)
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;
    use jsonwebtoken::{EncodingKey, Header};

    use crate::{
        domain::user::{session, Session},
        test_util::{service, SECRET},
        Command as _,
    };

    use super::AuthorizeUserSession;

    fn token(expires_at: DateTime, secret: &[u8]) -> session::Token {
        let session = Session {
            user_id: 7_u64.into(),
            expires_at: expires_at.coerce(),
        };
        session::Token::new(
            jsonwebtoken::encode(
                &Header::default(),
                &session,
                &EncodingKey::from_secret(secret),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn authorizes_valid_token() {
        let svc = service();
        let token = token(DateTime::now() + Duration::from_secs(60), SECRET);

        let session = svc.execute(AuthorizeUserSession { token }).await;

        assert_eq!(session.unwrap().user_id, 7_u64.into());
    }

    #[tokio::test]
    async fn rejects_foreign_or_expired_token() {
        let svc = service();

        let foreign = token(DateTime::now() + Duration::from_secs(60), b"x");
        assert!(svc
            .execute(AuthorizeUserSession { token: foreign })
            .await
            .is_err());

        let expired = token(DateTime::now() - Duration::from_secs(3600), SECRET);
        assert!(svc
            .execute(AuthorizeUserSession { token: expired })
            .await
            .is_err());
    }
}
