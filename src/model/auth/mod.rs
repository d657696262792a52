//! Identity of the caller, carried in a signed cookie.
//!
//! Proving who holds an identity happens outside this server; tokens are
//! minted by the operator (see the `token-cli` binary) and only verified here.

mod token;
mod user;

pub use token::{AuthToken, AUTH_TOKEN_COOKIE};
pub use user::{Admin, Rights, User, Voter};
