//! Lemon Slice talking-head video API SDK for Rust.
//!
//! This crate provides a client for interacting with the Lemon Slice API:
//! submitting a video generation job from a character image and an audio
//! URL, polling the returned [`Job`] until it completes, and downloading
//! the finished video artifact.

mod client;
mod error;
pub mod http;
mod job;
mod types;
mod video;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL};
pub use error::{Error, Result};
pub use job::Job;
pub use types::{GenerateVideoRequest, JobInfo, JobStatus};
pub use video::VideoService;
