//! MiniMax text-to-speech proxy core.
//!
//! Builds the upstream `t2a_v2` payload from a [`SynthesisRequest`], performs
//! the call through [`MinimaxClient`] and hands back decoded audio. The HTTP
//! front end lives in the `server` crate.

pub mod client;
pub mod codec;
pub mod error;
pub mod request;
pub mod response;

pub use client::MinimaxClient;
pub use error::{ErrorKind, SynthesisError};
pub use request::SynthesisRequest;
pub use response::SynthesizedAudio;
