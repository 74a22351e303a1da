// SPDX-License-Identifier: Apache-2.0

pub(crate) mod router;
pub(crate) mod state;
