//! News Digest - A static feed aggregator
//!
//! This crate fetches a fixed list of feeds concurrently, groups their
//! entries by source and renders them into a single HTML page.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod generate;
pub mod pipeline;
pub mod render;
pub mod source;
