//! Issues short-lived media room access tokens, picking a free room name
//! from the media service when the caller doesn't name one.

pub mod config;
pub mod error;
pub mod http;
pub mod room;
pub mod telemetry;
pub mod token;
pub mod util;
