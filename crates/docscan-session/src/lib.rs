// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-session — the live, in-memory list of captured pages and the
// manager that drives capture, deletion, reset, and PDF export through the
// bridge capabilities.

pub mod manager;
pub mod session;

pub use manager::{SessionManager, ViewState};
pub use session::DocumentSession;
