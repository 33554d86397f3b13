//! seekdream Android MDM adapter.
//!
//! Auth: agent login with an MD5-derived secret; `token` header plus
//! `X-API-Key` on every request. Every command is merchant-scoped.
//! Success markers: payload-embedded `code == 200` for lock/unlock, the
//! HTTP status for the rest.

mod adapter;
pub(crate) mod api;
mod auth;

pub use adapter::{SeekdreamMdm, TOKEN_KEY};
pub use auth::derive_login_secret;
