//! Record Access Tests
//!
//! End-to-end tests through the public `recordgate` surface:
//! - scenarios: encoded create, query building, offline create
//! - update identity stripping
//! - bulk fan-out outcomes
//! - per-call backend selection

mod common;

mod bulk;
mod dispatch;
mod scenarios;
mod update;
