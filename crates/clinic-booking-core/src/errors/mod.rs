// SPDX-License-Identifier: Apache-2.0

mod model;

pub use model::{ConflictKind, Error, ErrorCode, ExitCode, Result, ValidationFailure};
