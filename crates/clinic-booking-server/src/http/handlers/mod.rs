// SPDX-License-Identifier: Apache-2.0

pub(crate) mod admin;
pub(crate) mod appointments;
pub(crate) mod auth;
pub(crate) mod doctors;
pub(crate) mod system;
