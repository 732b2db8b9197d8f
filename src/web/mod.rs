//! HTTP service for part-number lookup.
//!
//! This module exposes the matching engine over a small JSON API using Axum.
//! The engine is built once at startup, its catalog loaded before the
//! listener accepts connections, and shared read-only by all handlers.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! chip-xref serve
//!
//! # Custom port, custom cross-reference table
//! chip-xref --catalog database/cross_reference.csv serve --port 3000
//!
//! # Bind to all interfaces
//! chip-xref serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /api/search` - Look up one part (`{"query": "NE555"}`) or a batch
//!   (`{"query": ["NE555", "LM358"]}`, or a string with `"type": "batch"`)
//! - `GET /api/suggest?q=...` - Similar catalogued part numbers
//! - `GET /api/stats` - Catalog record counts
//! - `GET /health` - Liveness probe

pub mod server;
