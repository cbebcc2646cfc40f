//! # Suntyn Tools
//!
//! HTTP service exposing a catalog of PDF, image, media, government-document
//! and developer tools. Each tool takes uploaded files and options and
//! publishes an assembled output file for download.
//!
//! ## Architecture Layers
//!
//! - **Domain**: entities, value objects, government document validation
//! - **Catalog / Assembly / Render**: the tool table, byte-level container
//!   writers (PDF, PNG, MP3, MP4, text) and the report templates they embed
//! - **Application**: use cases and ports (interfaces)
//! - **Infrastructure**: in-memory repositories, filesystem storage, JWT and Argon2
//! - **API**: HTTP handlers, middleware and the OpenAPI document
//!
//! ## Example Usage
//!
//! ```no_run
//! use suntyn_tools::assembly::{assemble, AssemblyContext, ToolOptions};
//! use suntyn_tools::catalog;
//!
//! let tool = catalog::resolve("pdf-merger").unwrap();
//! let output = assemble(tool, &[], &ToolOptions::new(), &AssemblyContext::now()).unwrap();
//! assert!(output.bytes.starts_with(b"%PDF-1."));
//! ```

pub mod api;
pub mod application;
pub mod assembly;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod render;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
