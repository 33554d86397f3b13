//! ishalou Apple MDM adapter.
//!
//! Auth: two-leg mobile-code login; raw `authorization` header.
//! Success marker: payload-embedded `status == 200`.

mod adapter;
pub(crate) mod api;

pub use adapter::{IshalouMdm, TOKEN_KEY};
