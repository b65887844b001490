//! # TaskCoach API Server Library
//!
//! Core functionality for the TaskCoach API server: a personal task tracker
//! with an AI coaching consultation feature.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `coach`: AI advice generator (contract, OpenAI-compatible client, mock)
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers
//! - `services`: Business-rule orchestrators (auth, tasks, consultations)

pub mod app;
pub mod coach;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
