//! Recommendation and preference-space engine for the movie rating client.
//!
//! Drives the one-movie-at-a-time rating loop (random and smart modes, smart
//! gated behind an unlock threshold) and explains each recommendation by
//! projecting the user's ratings into a 2-D embedding space.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
