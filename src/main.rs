use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use hostgate::args::Args;
use hostgate::{config, request_handler, server};
use hostgate_core::HostGroupGuard;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Validate arguments
    if let Err(err) = args.validate() {
        eprintln!("❌ Configuration error: {err}");
        std::process::exit(1);
    }

    init_logging(&args);

    // Load and validate host groups before accepting any traffic, so a
    // malformed CIDR pattern is an operator-facing startup failure
    let host_groups = config::get_host_group_config();
    if let Err(err) = host_groups.validate() {
        eprintln!("❌ Configuration error: {err}");
        std::process::exit(1);
    }

    server::print_startup_info(&args, host_groups);

    let host_guard = Arc::new(HostGroupGuard::new(
        args.group.clone(),
        Arc::new(host_groups.clone()),
    ));

    let http_client = match reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            eprintln!("❌ Failed to build HTTP client: {err}");
            std::process::exit(1);
        }
    };

    // Bind to address
    let bind_ip: IpAddr = match args.bind.parse() {
        Ok(ip) => ip,
        Err(_) => {
            eprintln!("❌ Invalid bind address: {}", args.bind);
            std::process::exit(1);
        }
    };
    let bind_addr = SocketAddr::from((bind_ip, args.listen));
    let listener = match TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("❌ Failed to bind to port {}: {}", args.listen, err);
            std::process::exit(1);
        }
    };

    println!("✅ HostGate is running on port {}", args.listen);

    // Accept connections
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                eprintln!("⚠️  Failed to accept connection: {err}");
                continue;
            }
        };

        if args.verbose && !args.quiet {
            println!("📡 New connection from {peer}");
        }

        let io = TokioIo::new(stream);
        let host_guard = host_guard.clone();
        let http_client = http_client.clone();
        let forward_host = args.bind.clone();
        let forward_port = args.forward;
        let verbose = args.verbose;
        let quiet = args.quiet;

        tokio::task::spawn(async move {
            let client_addr = peer.ip().to_string();
            let service = service_fn(move |req| {
                request_handler::handle_request(
                    req,
                    client_addr.clone(),
                    host_guard.clone(),
                    forward_host.clone(),
                    forward_port,
                    http_client.clone(),
                )
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                if !quiet {
                    if verbose {
                        eprintln!("⚠️  Connection error from {peer}: {err}");
                    } else {
                        eprintln!("⚠️  Connection error: {err}");
                    }
                }
            }
        });
    }
}

/// Initialize tracing output. `RUST_LOG` overrides the level implied by
/// the verbosity flags.
fn init_logging(args: &Args) {
    let default_level = if args.quiet {
        "warn"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if args.json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
