//! Core library for the linkage-tools command line application.
//!
//! The library links a portal table to a catalogue table on a shared key
//! column and copies a target attribute from the catalogue into each portal
//! record. The modules keep responsibilities narrow: the data representation
//! lives in [`model`], column checks in [`schema`], the exact and fuzzy
//! strategies under [`linkage`], file adapters under [`io`], settings in
//! [`config`] and the load → link → export orchestration in [`pipeline`].

pub mod config;
pub mod error;
pub mod io;
pub mod linkage;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod schema;

pub use error::{LinkError, Result};
pub use linkage::{
    KeyNormalization, LinkColumns, LinkOptions, LinkSummary, Scorer, Strategy, Threshold,
    exact_join, fuzzy_match, link,
};
pub use model::{Record, Table, TableRole, Value};
