//! Serptrack Server Library
//!
//! This module exposes the server components for testing purposes.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod providers;
pub mod routes;
pub mod scheduler;
pub mod serp;
pub mod services;
pub mod store;
