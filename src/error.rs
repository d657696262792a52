use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use rocket::{http::Status, response::Responder};
use thiserror::Error;
use voting_session::{IdentityError, SessionError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl Error {
    /// The HTTP status this error is reported with.
    pub fn status(&self) -> Status {
        match self {
            Self::Session(err) => match err {
                SessionError::NotAuthorized => Status::Forbidden,
                SessionError::AlreadyRegistered(_)
                | SessionError::AlreadyVoted(_)
                | SessionError::WrongPhase { .. } => Status::Conflict,
                SessionError::NotRegistered(_) | SessionError::NotFound(_) => Status::NotFound,
                SessionError::InvalidProposal(_) => Status::BadRequest,
                SessionError::NoProposals => Status::UnprocessableEntity,
            },
            Self::Identity(_) => Status::BadRequest,
            Self::Jwt(err) => match err.kind() {
                JwtErrorKind::ExpiredSignature | JwtErrorKind::ImmatureSignature => {
                    Status::Unauthorized
                }
                _ => Status::BadRequest,
            },
            Self::Unauthorized(_) => Status::Unauthorized,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        if status.class().is_server_error() {
            error!("{self}");
        } else {
            warn!("{self}");
        }
        Err(status)
    }
}
