use std::marker::PhantomData;

use chrono::{serde::ts_seconds, DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use rocket::{
    http::{Cookie, SameSite, Status},
    request::{FromRequest, Outcome},
    time::Duration,
    Request, State,
};
use serde::{Deserialize, Serialize};
use voting_session::VoterId;

use crate::config::Config;
use crate::error::Error;

use super::user::{Rights, User};

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// An authentication token representing a specific identity with specific rights.
#[derive(Serialize, Deserialize)]
pub struct AuthToken<U> {
    pub id: VoterId,
    #[serde(rename = "rgt")]
    pub rights: Rights,
    #[serde(skip)]
    phantom: PhantomData<U>,
}

impl<U> AuthToken<U> {
    /// Does this token permit the given rights?
    pub fn permits(&self, target: Rights) -> bool {
        self.rights >= target
    }
}

impl<U> AuthToken<U>
where
    U: User,
{
    /// Create a new [`AuthToken`] for the given identity, with the rights of this user type.
    pub fn new(id: VoterId) -> Self {
        Self {
            id,
            rights: U::RIGHTS,
            phantom: PhantomData,
        }
    }

    /// Encode this token as a signed JWT that expires after the configured lifetime.
    pub fn encode(self, config: &Config) -> Result<String, Error> {
        let claims = Claims {
            token: self,
            expire_at: Utc::now() + config.auth_ttl(),
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret()),
        )?;
        Ok(token)
    }

    #[allow(clippy::missing_panics_doc)]
    /// Serialize this token into a cookie.
    pub fn into_cookie(self, config: &Config) -> Cookie<'static> {
        let token = self
            .encode(config)
            .expect("JWT encoding is infallible with default settings");

        Cookie::build(AUTH_TOKEN_COOKIE, token)
            .max_age(Duration::seconds(config.auth_ttl().num_seconds()))
            .http_only(true)
            .same_site(SameSite::Strict)
            .finish()
    }

    /// Deserialize a token from a cookie.
    pub fn from_cookie(cookie: &Cookie<'static>, config: &Config) -> Result<Self, Error> {
        let token = jsonwebtoken::decode(
            cookie.value(),
            &DecodingKey::from_secret(config.jwt_secret()),
            &Validation::default(),
        )
        .map(|claims: TokenData<Claims<U>>| claims.claims.token)?;
        Ok(token)
    }
}

/// Cookie claims: the token itself plus an expiry datetime.
#[derive(Serialize, Deserialize)]
struct Claims<U> {
    #[serde(flatten, bound = "")]
    token: AuthToken<U>,
    #[serde(rename = "exp", with = "ts_seconds")]
    expire_at: DateTime<Utc>,
}

#[rocket::async_trait]
impl<'r, U> FromRequest<'r> for AuthToken<U>
where
    U: User + Send,
{
    type Error = Error;

    /// Get an [`AuthToken`] from the cookie and verify that it has sufficient rights for this
    /// user type.
    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let config = match req.guard::<&State<Config>>().await {
            Outcome::Success(config) => config,
            _ => {
                error!("Config is not managed; cannot check authentication");
                return Outcome::Failure((
                    Status::InternalServerError,
                    Error::Unauthorized("server misconfigured".to_string()),
                ));
            }
        };

        let Some(cookie) = req.cookies().get(AUTH_TOKEN_COOKIE) else {
            return Outcome::Failure((
                Status::Unauthorized,
                Error::Unauthorized("no authentication token".to_string()),
            ));
        };

        let token: Self = match Self::from_cookie(cookie, config) {
            Ok(token) => token,
            Err(e) => {
                warn!("Rejected authentication token: {e}");
                return Outcome::Failure((Status::Unauthorized, e));
            }
        };

        // Check it represents sufficient rights.
        if !token.permits(U::RIGHTS) {
            warn!(
                "Token for {} has {} rights, {} required",
                token.id,
                token.rights,
                U::RIGHTS
            );
            return Outcome::Failure((
                Status::Forbidden,
                Error::Unauthorized(format!("{} rights required", U::RIGHTS)),
            ));
        }

        Outcome::Success(token)
    }
}

#[cfg(test)]
mod tests {
    use rocket::http::Cookie;

    use super::*;
    use crate::model::auth::{Admin, Voter};

    fn config() -> Config {
        rocket::Config::figment().extract().unwrap()
    }

    #[test]
    fn cookie_round_trip() {
        let config = config();
        let cookie = AuthToken::<Admin>::new(VoterId::example(3)).into_cookie(&config);
        assert_eq!(cookie.name(), AUTH_TOKEN_COOKIE);
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));

        let token = AuthToken::<Admin>::from_cookie(&cookie, &config).unwrap();
        assert_eq!(token.id, VoterId::example(3));
        assert_eq!(token.rights, Rights::Admin);
    }

    #[test]
    fn rights_are_ordered() {
        let admin = AuthToken::<Admin>::new(VoterId::example(1));
        assert!(admin.permits(Rights::Admin));
        assert!(admin.permits(Rights::Voter));

        let voter = AuthToken::<Voter>::new(VoterId::example(2));
        assert!(voter.permits(Rights::Voter));
        assert!(!voter.permits(Rights::Admin));
    }

    #[test]
    fn reject_tampered_token() {
        let config = config();
        let cookie = AuthToken::<Voter>::new(VoterId::example(4)).into_cookie(&config);
        let mut value = cookie.value().to_string();
        value.push('x');
        let tampered = Cookie::new(AUTH_TOKEN_COOKIE, value);
        assert!(AuthToken::<Voter>::from_cookie(&tampered, &config).is_err());
    }
}
