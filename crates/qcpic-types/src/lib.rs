// ─────────────────────────────────────────────────────────────────────
// QCPIC — Shared Types
// License: BSD-3-Clause
// ─────────────────────────────────────────────────────────────────────
pub mod config;
pub mod constants;
pub mod error;
pub mod state;
