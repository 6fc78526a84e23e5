#![deny(missing_docs)]
//! kvs-extra provides extended functionality for the kvs command line tool.
//!
//! The kvs server itself only speaks in single keys. This crate adds bulk
//! operations on top of it: a recursive **export** of every key under a root
//! prefix into one nested JSON document, and an **import** that flattens a
//! JSON/JSON5 document back into individual key writes. A pair of read-only
//! status queries reports the cluster leader and peer set.
//!
//! ## Path Codec
//! Keys in the store are flat, slash-delimited strings; nesting is purely a
//! client-side convention imposed by the delimiter. The [`codec`] module
//! holds the [`flatten`]/[`unflatten`] pair that converts between the two
//! shapes and detects structurally conflicting key sets.
//!
//! ## Round-Trip Pipeline
//! The [`ops`] module implements export and import over any [`KeySpace`].
//! Every remote call is an independent round trip: export discards all
//! partial results on the first failed fetch, and import stops at the first
//! failed write without rolling back earlier ones.
//!
//! ## Client / Protocol
//! [`KvsClient`] talks to the server over a socket, exchanging JSON-encoded
//! [`Request`] and [`Response`] values. The [`kvs-extra`] executable wires
//! the pipeline to the client and handles arguments, logging and exit codes.
//!
//! [`flatten`]: ./codec/fn.flatten.html
//! [`unflatten`]: ./codec/fn.unflatten.html
//! [`KeySpace`]: ./client/trait.KeySpace.html
//! [`Request`]: ./command/enum.Request.html
//! [`Response`]: ./command/enum.Response.html
//! [`kvs-extra`]: ./bin/kvs-extra.rs

pub use client::{KeySpace, KvsClient};
pub use codec::{flatten, unflatten, FlatEntry, Scalar, DELIMITER};
pub use command::{PeerDescriptor, Request, Response};
pub use error::{KvsExtraError, Result};

pub mod client;
pub mod codec;
pub mod command;
mod error;
pub mod ops;
