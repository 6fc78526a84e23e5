//! The remote key space seam: the [`KeySpace`] trait the pipeline is written
//! against, and [`KvsClient`], its socket-backed implementation.

use std::io::{BufReader, BufWriter, Write};
use std::net::{TcpStream, ToSocketAddrs};
use serde::Deserialize;
use serde_json::de::IoRead;
use serde_json::Deserializer;
use crate::codec::Scalar;
use crate::command::{PeerDescriptor, Request, Response};
use crate::{KvsExtraError, Result};

/// A trait for the remote key space this tool operates on.
///
/// Every method is one independent remote round trip that may fail; the
/// export/import pipeline holds no state across calls and never assumes two
/// calls are atomic with respect to each other.
pub trait KeySpace {
    /// lists every stored key under `prefix`
    fn list_keys(&mut self, prefix: &str) -> Result<Vec<String>>;

    /// gets the scalar value stored under `key`
    fn get_value(&mut self, key: &str) -> Result<Scalar>;

    /// sets `key` to `value`, overwriting any previous value
    fn set_value(&mut self, key: &str, value: &Scalar) -> Result<()>;

    /// returns the current cluster leader
    fn leader(&mut self) -> Result<PeerDescriptor>;

    /// returns the current cluster peer set
    fn peers(&mut self) -> Result<Vec<PeerDescriptor>>;
}

/// `KvsClient` implements [`KeySpace`] over a socket connection to a kvs
/// server, exchanging JSON-encoded [`Request`]s and [`Response`]s.
pub struct KvsClient {
    reader: Deserializer<IoRead<BufReader<TcpStream>>>,
    writer: BufWriter<TcpStream>,
}

impl KvsClient {
    /// creates a client and establishes a socket connection to the server at the given `addr`
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let tcp_reader = TcpStream::connect(addr)?;
        let tcp_writer = tcp_reader.try_clone()?;

        Ok(KvsClient {
            reader: Deserializer::from_reader(BufReader::new(tcp_reader)),
            writer: BufWriter::new(tcp_writer),
        })
    }

    /// sends one request and reads back the server's response
    fn round_trip(&mut self, req: &Request) -> Result<Response> {
        serde_json::to_writer(&mut self.writer, req)?;
        self.writer.flush()?;
        Ok(Response::deserialize(&mut self.reader)?)
    }
}

/// builds the error for a response variant that does not answer the request
fn unexpected(resp: &Response) -> KvsExtraError {
    KvsExtraError::StringErr(format!("unexpected response from server: {:?}", resp))
}

impl KeySpace for KvsClient {
    fn list_keys(&mut self, prefix: &str) -> Result<Vec<String>> {
        let req = Request::Keys { prefix: prefix.to_string() };
        match self.round_trip(&req)? {
            Response::Keys(keys) => Ok(keys),
            Response::Err(msg) => Err(KvsExtraError::StringErr(msg)),
            other => Err(unexpected(&other)),
        }
    }

    fn get_value(&mut self, key: &str) -> Result<Scalar> {
        let req = Request::Get { key: key.to_string() };
        match self.round_trip(&req)? {
            Response::Value(value) => Ok(value),
            Response::Err(msg) => Err(KvsExtraError::StringErr(msg)),
            other => Err(unexpected(&other)),
        }
    }

    fn set_value(&mut self, key: &str, value: &Scalar) -> Result<()> {
        let req = Request::Set { key: key.to_string(), value: value.clone() };
        match self.round_trip(&req)? {
            Response::Ok => Ok(()),
            Response::Err(msg) => Err(KvsExtraError::StringErr(msg)),
            other => Err(unexpected(&other)),
        }
    }

    fn leader(&mut self) -> Result<PeerDescriptor> {
        match self.round_trip(&Request::Leader)? {
            Response::Leader(peer) => Ok(peer),
            Response::Err(msg) => Err(KvsExtraError::StringErr(msg)),
            other => Err(unexpected(&other)),
        }
    }

    fn peers(&mut self) -> Result<Vec<PeerDescriptor>> {
        match self.round_trip(&Request::Peers)? {
            Response::Peers(peers) => Ok(peers),
            Response::Err(msg) => Err(KvsExtraError::StringErr(msg)),
            other => Err(unexpected(&other)),
        }
    }
}
