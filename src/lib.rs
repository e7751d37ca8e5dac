//! Client Context Library
//!
//! Tracks the client a multi-tenant dashboard is currently working on. The
//! client list is read from a Supabase table, the last selection is remembered
//! in durable local storage, and both are exposed through a subscribable
//! handle.

pub mod config;
pub mod constants;
pub mod context;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod services;
pub mod state;
pub mod storage;
