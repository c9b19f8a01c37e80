//! Language drills: typed and multiple-choice exercises scored per session,
//! plus vocabulary quizzes with sampled distractors.
//!
//! The engine (`exercise`, `validator`, `sampler`, `session`, `quiz`) has no
//! terminal dependencies. `app`, `ui` and `runtime` make up the front end and
//! are exposed so it can be driven headlessly in tests.
pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod exercise;
pub mod quiz;
pub mod runtime;
pub mod sampler;
pub mod session;
pub mod summary;
pub mod ui;
pub mod util;
pub mod validator;
