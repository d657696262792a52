//! API-compatible types.
//!
//! The types in this module are serialised in an API-friendly way, e.g.:
//!
//! - Identities are serialised as `0x`-prefixed hex strings.
//! - Workflow statuses carry both their name and numeric code.

pub mod pagination;
pub mod proposal;
pub mod session;
pub mod vote;
pub mod voter;
