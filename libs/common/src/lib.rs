//! Common library for the blog API
//!
//! This crate provides functionality shared by the blog services:
//! PostgreSQL connection pooling and the database error types.

pub mod database;
pub mod error;
