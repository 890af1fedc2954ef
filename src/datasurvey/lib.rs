//! # Datasurvey Architecture
//!
//! Datasurvey inventories a labeled raster dataset: it checks CSV manifests
//! against the image files on disk, reads basic raster metadata through an
//! external diagnostic tool, and writes a Markdown summary.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, prints, sets up logging                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, generic over the probe        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - report, check, probe orchestration                       │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  manifest, listing, probe, reconcile, shapes, report        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifiers
//!
//! A manifest row and an image file match when the row's id and the file's
//! stem are equal after [`model::normalize_id`]. Both [`listing::file_id`] and
//! [`reconcile::reconcile`] go through it.
//!
//! ## Execution Model
//!
//! Everything runs on one thread. Each probe spawns one child process and
//! waits for it, which dominates run time; `max_files` bounds how many files
//! are probed.
//!
//! ## Module Overview
//!
//! - [`api`]: entry point for all operations
//! - [`commands`]: report, check and probe orchestration
//! - [`manifest`]: CSV manifest reading
//! - [`listing`]: image file enumeration and id derivation
//! - [`probe`]: external metadata tool and output parsing
//! - [`reconcile`]: missing/extra id sets
//! - [`shapes`]: shape histograms
//! - [`report`]: report data, Markdown rendering and writing
//! - [`config`]: configuration
//! - [`model`]: shared data types
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod listing;
pub mod manifest;
pub mod model;
pub mod probe;
pub mod reconcile;
pub mod report;
pub mod shapes;
