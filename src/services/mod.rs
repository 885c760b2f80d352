// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Processing services: validation, id extraction, diffing, orchestration,
//! and outbound notification.

pub mod diff;
pub mod identity;
pub mod notify;
pub mod processor;
pub mod validator;

pub use notify::Notifier;
pub use processor::{ProcessingOutcome, WorkoutProcessor};
