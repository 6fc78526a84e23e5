#![allow(dead_code)]
//! A minimal in-process kvs server used by the integration tests. It answers
//! the tool's wire protocol from a shared BTreeMap, one connection at a time.

use std::collections::BTreeMap;
use std::error::Error;
use std::io::{BufReader, BufWriter, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use serde_json::Deserializer;
use kvs_extra::{PeerDescriptor, Request, Response, Scalar};

type SharedData = Arc<Mutex<BTreeMap<String, Scalar>>>;

/// a fixture server listening on an OS-assigned port; `data` is shared with
/// the test so it can seed keys and inspect writes
pub struct TestServer {
    pub addr: SocketAddr,
    pub data: SharedData,
}

impl TestServer {
    /// starts the server on 127.0.0.1 with the given seed keys
    pub fn start(seed: &[(&str, Scalar)]) -> TestServer {
        let data: SharedData = Arc::new(Mutex::new(
            seed.iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::clone(&data);
        thread::spawn(move || {
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => {
                        if let Err(e) = serve(&state, stream) {
                            eprintln!("test server error: {}", e);
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        TestServer { addr, data }
    }

    /// the --addr argument value for this server
    pub fn addr_arg(&self) -> String {
        self.addr.to_string()
    }

    /// a copy of the current key/value contents
    pub fn snapshot(&self) -> BTreeMap<String, Scalar> {
        self.data.lock().unwrap().clone()
    }
}

/// reads requests off one connection and answers each until the client hangs up
fn serve(data: &SharedData, tcp: TcpStream) -> Result<(), Box<dyn Error>> {
    let stream_reader = BufReader::new(&tcp);
    let mut stream_writer = BufWriter::new(&tcp);
    let req_reader = Deserializer::from_reader(stream_reader).into_iter::<Request>();

    for req in req_reader {
        let resp = handle(data, req?);
        serde_json::to_writer(&mut stream_writer, &resp)?;
        stream_writer.flush()?;
    }
    Ok(())
}

fn handle(data: &SharedData, req: Request) -> Response {
    let mut data = data.lock().unwrap();
    match req {
        Request::Keys { prefix } => {
            let keys: Vec<String> = data
                .keys()
                .filter(|k| k.starts_with(&prefix))
                .cloned()
                .collect();
            if keys.is_empty() {
                Response::Err(format!("no keys under '{}'", prefix))
            } else {
                Response::Keys(keys)
            }
        }
        Request::Get { key } => match data.get(&key) {
            Some(value) => Response::Value(value.clone()),
            None => Response::Err(format!("key not found: {}", key)),
        },
        Request::Set { key, value } => {
            data.insert(key, value);
            Response::Ok
        }
        Request::Leader => Response::Leader(leader()),
        Request::Peers => Response::Peers(vec![
            leader(),
            PeerDescriptor {
                id: "node-2".to_string(),
                address: "127.0.0.1:8301".to_string(),
            },
        ]),
    }
}

fn leader() -> PeerDescriptor {
    PeerDescriptor {
        id: "node-1".to_string(),
        address: "127.0.0.1:8300".to_string(),
    }
}
