//! Core library for postiztools
//!
//! This crate implements the **Functional Core** of the postiztools
//! application, following the Functional Core - Imperative Shell
//! architectural pattern.
//!
//! # Architecture Overview
//!
//! The postiztools project uses a two-crate architecture to enforce
//! separation of concerns:
//!
//! - **`postiztools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`postiztools`**: I/O operations and orchestration (the Imperative Shell)
//!
//! All functions here are deterministic given their inputs (the single
//! exception is the clock read when resolving a "publish now" date) and can
//! be tested with fixture data, no mocking required.
//!
//! # Module Organization
//!
//! - [`status`]: Publication status to Postiz API post type mapping
//! - [`dates`]: Timestamp parsing and date range normalization
//! - [`markup`]: Lightweight Markdown-to-HTML content conversion
//! - [`posts`]: Post domain models, validation, and request shaping
//! - [`video`]: Video generation request validation
//! - [`schema`]: Declarative tool parameter descriptors shared by the CLI
//!   and MCP front-ends
//! - [`envelope`]: The uniform `{success, ...}` result envelope every tool
//!   returns
//!
//! The key invariant lives in [`schema`]: each tool's parameters are
//! declared exactly once, and both argument-collection strategies (MCP
//! message, CLI flags) interpret the same descriptor set. Request shaping
//! in [`posts`] is pure so that the create/update translation — including
//! the update-as-create identity injection — can be asserted on directly.

pub mod dates;
pub mod envelope;
pub mod markup;
pub mod posts;
pub mod schema;
pub mod status;
pub mod video;
