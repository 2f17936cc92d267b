//! `antenna-scheduler` decides when a service invocation runs.
//!
//! # Overview
//!
//! Every request that reaches a service goes through
//! [`Scheduler::schedule`], which picks one of four outcomes:
//!
//! | Situation                        | Behaviour                                   |
//! |----------------------------------|---------------------------------------------|
//! | Delayed run already pending      | Ignored; the pending payload wins           |
//! | `delay = 0`, `async = false`     | Run now, caller awaits the results          |
//! | `delay = 0`, `async = true`      | Run on a detached task, errors only logged  |
//! | `delay > 0`                      | Arm a one-shot timer, errors only logged    |
//!
//! Pending state lives in memory only and is lost on restart.

pub mod engine;
pub mod types;

pub use engine::Scheduler;
pub use types::PendingInvocation;
