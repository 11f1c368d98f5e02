// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Production implementations of the trait abstractions.
//!
//! These talk to real RPC endpoints, Circle's attestation service and the
//! system clock. Tests use [`crate::testing`] instead.

mod alloy;
mod clock;
mod iris;

pub use self::alloy::{http_provider, signing_provider, AlloyProvider};
pub use self::clock::{Deadline, TokioClock};
pub use self::iris::{IrisAttestationProvider, DEFAULT_RETRY_AFTER_SECS};
