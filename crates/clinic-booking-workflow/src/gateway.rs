// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clinic_booking_core::{AccountId, Result};
use clinic_booking_model::{Account, Booking, BookingRequest, Role};

/// The account a workflow acts for. The role must come from storage, never
/// from a client-supplied claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub account_id: AccountId,
    pub role: Role,
}

impl From<&Account> for Actor {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            role: account.role,
        }
    }
}

/// The single create call a confirmed workflow makes.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn submit(&self, actor: Actor, request: BookingRequest) -> Result<Booking>;
}
