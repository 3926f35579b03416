//! Albumfetch - album page data from a music server API
//!
//! This library fetches album info and tracks, album artists, album
//! biographies and other albums by the same artist, and normalizes every
//! reply into a value callers can use without further checks.

/// Client modules for interacting with the music server
pub mod clients;
/// Runtime configuration
pub mod config;
