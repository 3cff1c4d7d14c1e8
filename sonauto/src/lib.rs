//! Sonauto music generation API SDK for Rust.
//!
//! This crate provides a client for interacting with the Sonauto API:
//! song generation from a text prompt or lyrics, and inpainting of a time
//! range within existing audio. Generation runs as an asynchronous task on
//! the service side; the returned [`Task`] is polled until it reaches a
//! terminal status and then yields the finished [`Generation`].

mod client;
mod error;
pub mod http;
mod songs;
mod task;
mod types;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL};
pub use error::{Error, Result};
pub use songs::SongService;
pub use task::{DEFAULT_ERROR_DETAIL, Task};
pub use types::{Generation, GenerationRequest, InpaintRequest, TaskStatus};
