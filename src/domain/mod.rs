//! Domain - Core Data Types

mod client;

pub use client::*;
