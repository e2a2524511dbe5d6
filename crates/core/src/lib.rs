//! Core library for webgen
//!
//! This crate implements the **Functional Core** of the webgen application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`webgen_core`** (this crate): Pure transformation functions with zero I/O
//! - **`webgen`**: HTTP transport, configuration, CLI and MCP surfaces (the Imperative Shell)
//!
//! Everything between "the model answered with some text" and "the preview
//! receives a file map and a dependency map" lives here and can be tested with
//! fixture strings, no network and no mocking.
//!
//! # Module Organization
//!
//! - [`generation`]: Prompt construction, request bodies and reply parsing for the
//!   `generateContent` endpoint
//! - [`materialize`]: Raw reply to a complete, runnable project file map
//! - [`deps`]: Package dependency inference from file contents
//! - [`preview`]: The payload handed to the preview environment
//! - [`status`]: Pipeline progress events and the sink they are reported to
//!
//! # Example Usage
//!
//! ```rust
//! use webgen_core::deps::infer;
//! use webgen_core::materialize::materialize;
//! use webgen_core::preview::PreviewBundle;
//!
//! let raw = "---FILES---\n---FILE:App.js---\nconsole.log(1)\n---ENDFILE---\n---ENDFILES---";
//!
//! let files = materialize(raw).into_files();
//! let dependencies = infer(&files);
//! let bundle = PreviewBundle::assemble(files, dependencies);
//!
//! assert_eq!(bundle.files["/App.js"], "console.log(1)");
//! assert_eq!(bundle.entry, "/index.js");
//! assert!(bundle.dependencies.contains_key("react-dom"));
//! ```

pub mod deps;
pub mod generation;
pub mod materialize;
pub mod preview;
pub mod status;
