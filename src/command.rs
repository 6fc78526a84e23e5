//! The wire types exchanged with the kvs server as JSON values.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::codec::Scalar;

/// These are the request "commands" that can be made to the key/value store
/// server. Each one is a single, independent network round trip.
#[derive(Debug, Serialize, Deserialize)]
pub enum Request {
    /// list every stored key under a prefix
    Keys {
        /// the key prefix to enumerate; "" lists the whole key space
        prefix: String,
    },
    /// get the value stored under a key
    Get {
        /// the key to search for
        key: String,
    },
    /// set a key/value in the store
    Set {
        /// the key to set
        key: String,
        /// the value to set
        value: Scalar,
    },
    /// ask for the current cluster leader
    Leader,
    /// ask for the current cluster peer set
    Peers,
}

/// The response types that can be returned for any [`Request`]
#[derive(Debug, Serialize, Deserialize)]
pub enum Response {
    /// the keys matching a `Keys` request
    Keys(Vec<String>),
    /// the value answering a `Get` request
    Value(Scalar),
    /// a `Set` request was applied
    Ok,
    /// the leader answering a `Leader` request
    Leader(PeerDescriptor),
    /// the peer set answering a `Peers` request
    Peers(Vec<PeerDescriptor>),
    /// this variant is returned if an error occurs while processing a request
    Err(String),
}

/// Describes one member of the store's cluster. The tool passes these through
/// unmodified; it never interprets the fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerDescriptor {
    /// the node's identifier
    pub id: String,
    /// the node's raft address, as "ip:port"
    pub address: String,
}

impl fmt::Display for PeerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.address)
    }
}
