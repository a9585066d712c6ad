//! # wisetech
//!
//! Backend for a gadget-review platform: users register, browse and search
//! phones, laptops and tablets, post reviews, and admins moderate content.
//!
//! ## Gadget search
//!
//! ```text
//!   query ──► normalize (trim + lowercase)
//!                │
//!                ▼
//!   retrieval: short query (≤ 2 chars)  → name/brand exact, prefix, word prefix
//!              long query               → substring in name, brand, description
//!              + optional category substring filter
//!                │
//!                ▼
//!   relevance tiers: exact 100 │ prefix 80 │ word start 60
//!                    substring 40 │ description 10   (+5 short name)
//!                │
//!                ▼
//!   stable sort by score desc ──► skip / limit
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server and data dir
//! - [`models`] - Users, gadgets, reviews and request/response types
//! - [`db`] - In-memory store with id sequences, cascades and rating stats
//! - [`search`] - Relevance-ranked gadget search
//! - [`listing`] - Filtered, sorted and paginated review listing
//! - [`seed`] - Demo catalogue loaded into an empty store
//! - [`api`] - Axum HTTP handlers and router
//! - [`state`] - Shared application state and JSON persistence

pub mod api;
pub mod config;
pub mod db;
pub mod listing;
pub mod models;
pub mod search;
pub mod seed;
pub mod state;
