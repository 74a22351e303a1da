// SPDX-License-Identifier: Apache-2.0

//! Access gate: bearer tokens and the middleware that resolves them to a
//! stored account.

mod gate;
mod token;

pub use gate::CurrentAccount;
pub(crate) use gate::{require_account, require_admin};
pub use token::{TokenClaims, TokenError, TokenSigner};
