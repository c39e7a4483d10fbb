//! Integration tests for role reconciliation and staleness-gated refresh

mod cli_parse;
mod refresh_gate;
mod role_lifecycle;
