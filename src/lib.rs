//! Paystub Engine
//!
//! This crate turns a payroll CSV into one PDF paystub per employee and
//! hands each paystub to a dispatch sink, returning a manifest of what was
//! sent. The batch pipeline lives in [`pipeline`]; [`api`] exposes it over
//! HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod assets;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod render;
