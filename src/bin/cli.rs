//! memtext CLI Client
//!
//! Command-line interface for talking to a memcached server.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use memtext::{Client, ClientParams};

/// memtext CLI
#[derive(Parser, Debug)]
#[command(name = "memtext-cli")]
#[command(about = "CLI client for the memcached text protocol")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:11211")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Get a value together with its CAS token
    Gets {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,

        /// Opaque 32-bit flags stored with the value
        #[arg(short, long, default_value = "0")]
        flags: u32,

        /// Expiry time in seconds (0 = never)
        #[arg(short, long, default_value = "0")]
        exptime: u32,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Increment a counter
    Incr {
        /// The counter key
        key: String,

        /// Amount to add
        #[arg(short, long, default_value = "1")]
        delta: u64,
    },

    /// Decrement a counter
    Decr {
        /// The counter key
        key: String,

        /// Amount to subtract
        #[arg(short, long, default_value = "1")]
        delta: u64,
    },

    /// Update a key's expiry without touching its value
    Touch {
        /// The key to touch
        key: String,

        /// New expiry time in seconds
        #[arg(short, long, default_value = "0")]
        exptime: u32,
    },

    /// Dump server statistics
    Stats,

    /// Print the server version
    Version,

    /// Invalidate all items
    FlushAll {
        /// Optional delay in seconds before the flush takes effect
        #[arg(short, long)]
        delay: Option<u32>,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let (host, port) = match parse_server_addr(&args.server) {
        Some(addr) => addr,
        None => {
            eprintln!("invalid server address: {}", args.server);
            std::process::exit(2);
        }
    };

    let mut client = match ClientParams::new(host, port).connect() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("could not connect to {}: {}", args.server, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut client, args.command) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Execute one subcommand against a connected client
fn run(client: &mut Client<std::net::TcpStream>, command: Commands) -> memtext::Result<()> {
    match command {
        Commands::Get { key } => {
            let item = client.get(&key)?;
            println!("{}", String::from_utf8_lossy(&item.value));
        }
        Commands::Gets { key } => {
            let item = client.gets(&key)?;
            println!(
                "cas={} {}",
                item.cas_unique.unwrap_or(0),
                String::from_utf8_lossy(&item.value)
            );
        }
        Commands::Set {
            key,
            value,
            flags,
            exptime,
        } => {
            client.set(&key, value.as_bytes(), flags, exptime, false)?;
            println!("STORED");
        }
        Commands::Del { key } => {
            client.delete(&key, false)?;
            println!("DELETED");
        }
        Commands::Incr { key, delta } => {
            if let Some(value) = client.incr(&key, delta, false)? {
                println!("{}", value);
            }
        }
        Commands::Decr { key, delta } => {
            if let Some(value) = client.decr(&key, delta, false)? {
                println!("{}", value);
            }
        }
        Commands::Touch { key, exptime } => {
            client.touch(&key, exptime, false)?;
            println!("TOUCHED");
        }
        Commands::Stats => {
            for (name, value) in client.stats()?.iter() {
                println!("{} {}", name, value);
            }
        }
        Commands::Version => {
            println!("{}", client.version()?);
        }
        Commands::FlushAll { delay } => {
            client.flush_all(delay, false)?;
            println!("OK");
        }
    }
    Ok(())
}

/// Split a `host:port` address, returning `None` when malformed
fn parse_server_addr(addr: &str) -> Option<(String, u16)> {
    let (host, port) = addr.rsplit_once(':')?;
    let port = port.parse().ok()?;
    Some((host.to_string(), port))
}
