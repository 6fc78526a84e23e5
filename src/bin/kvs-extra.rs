//! The kvs-extra executable provides extended functionality for the kvs
//! command line tool. It supports the following commands:
//!
//! `kvs-extra kv export [ROOT_KEY] [--addr IP-PORT]`
//!
//!     Export every key under ROOT_KEY (the whole key space when omitted) as
//!     a nested JSON document on stdout, 2-space indented.
//!
//! `kvs-extra kv import <FILE> [--addr IP-PORT]`
//!
//!     Flatten the JSON/JSON5 document in FILE into slash-delimited keys and
//!     write each one to the store, in document order.
//!
//! `kvs-extra status leader` / `kvs-extra status peers`
//!
//!     Show the current raft leader / peer set.
//!
//! --addr accepts an IP address, either v4 or v6, and a port number, with the
//! format IP:PORT. If --addr is not specified then connect on 127.0.0.1:4000.
//! Any command that fails prints an error and exits with code 200.

use std::io;
use std::net::SocketAddr;
use std::process::exit;
use clap::{crate_version, App, Arg, ArgMatches, SubCommand};
use kvs_extra::{ops, KeySpace, KvsClient, KvsExtraError, Result};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_ADDRESS: &str = "127.0.0.1:4000";

/// the exit code used for any uncaught error
const FAILURE_EXIT_CODE: i32 = 200;

fn main() {
    let mut app = build_app();
    let matches = app.clone().get_matches();
    let debug = matches.is_present("debug");

    // configure a subscriber that will log messages to STDERR, leaving
    // STDOUT free for the exported document
    subscriber_config(debug);

    // no command given: mirror --help and exit cleanly
    if matches.subcommand_name().is_none() {
        let _ = app.print_long_help();
        println!();
        return;
    }

    if let Err(e) = run(&matches) {
        if debug {
            error!("{:?}", e);
        } else {
            error!("{}", e);
        }
        exit(FAILURE_EXIT_CODE);
    }
}

/// dispatches the parsed command line onto the client and the pipeline
fn run(matches: &ArgMatches) -> Result<()> {
    let addr = parse_addr(matches.value_of("addr").unwrap())?;

    match matches.subcommand() {
        ("kv", Some(kv_matches)) => match kv_matches.subcommand() {
            ("export", Some(args)) => {
                let root_key = args.value_of("ROOT_KEY").unwrap_or("");
                let mut client = KvsClient::connect(addr)?;
                let stdout = io::stdout();
                ops::export(&mut client, root_key, &mut stdout.lock())
            }
            ("import", Some(args)) => {
                // checked before connecting so a missing argument never
                // results in a connection attempt
                let file_name = args
                    .value_of("FILE")
                    .ok_or(KvsExtraError::MissingArgument)?;
                let mut client = KvsClient::connect(addr)?;
                ops::import(&mut client, file_name)
            }
            (unknown, _) => Err(KvsExtraError::Parsing(format!(
                "unknown 'kv' sub-command '{}'",
                unknown
            ))),
        },
        ("status", Some(status_matches)) => match status_matches.subcommand() {
            ("leader", _) => {
                let mut client = KvsClient::connect(addr)?;
                println!("{}", client.leader()?);
                Ok(())
            }
            ("peers", _) => {
                let mut client = KvsClient::connect(addr)?;
                for peer in client.peers()? {
                    println!("{}", peer);
                }
                Ok(())
            }
            (unknown, _) => Err(KvsExtraError::Parsing(format!(
                "unknown 'status' sub-command '{}'",
                unknown
            ))),
        },
        (unknown, _) => Err(KvsExtraError::Parsing(format!(
            "unknown command '{}'",
            unknown
        ))),
    }
}

/// builds the clap App describing the full command line surface
fn build_app<'a, 'b>() -> App<'a, 'b> {
    App::new("kvs-extra")
        .version(crate_version!())
        .about("Provides extended functionality for the kvs command line tool")
        .arg(
            Arg::with_name("addr")
                .long("addr")
                .value_name("IP_ADDR:PORT")
                .help("sets the IP_ADDR:PORT of the server to connect to")
                .default_value(DEFAULT_ADDRESS)
                .global(true),
        )
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("show debug output")
                .global(true),
        )
        .subcommand(
            SubCommand::with_name("kv")
                .about("Operations on the key/value store")
                .subcommand(
                    SubCommand::with_name("export")
                        .about("Export keys under a root key in JSON format")
                        .arg(Arg::with_name("ROOT_KEY").index(1)),
                )
                .subcommand(
                    SubCommand::with_name("import")
                        .about("Import keys from a JSON/JSON5 file")
                        .arg(Arg::with_name("FILE").index(1)),
                ),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("Cluster status operations")
                .subcommand(
                    SubCommand::with_name("leader").about("Show the current raft leader"),
                )
                .subcommand(
                    SubCommand::with_name("peers").about("Show the current raft peer set"),
                ),
        )
}

/// validates the `addr` parameter is a valid IP address and PORT
/// # Errors
/// returns [`KvsExtraError::Parsing`] if the address is invalid
fn parse_addr(addr: &str) -> Result<SocketAddr> {
    addr.parse().map_err(|_| {
        KvsExtraError::Parsing(format!(
            "could not parse {} into an IP address and port",
            addr
        ))
    })
}

/// configures a tracing subscriber that will log to STDERR
fn subscriber_config(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        // log to stderr instead of stdout
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting tracing default subscriber failed");
}
