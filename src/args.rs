//! Command line argument parsing for HostGate.
//!
//! This module defines the CLI interface using [`clap`] for argument
//! parsing. It provides configuration for binding addresses, ports, the
//! guarded host group, and output verbosity.
//!
//! # Example
//!
//! ```no_run
//! use hostgate::args::Args;
//! use clap::Parser;
//!
//! let args = Args::parse();
//! if let Err(e) = args.validate() {
//!     eprintln!("Configuration error: {}", e);
//!     std::process::exit(1);
//! }
//! ```

use clap::Parser;

/// Command line arguments for HostGate.
///
/// # Example
///
/// ```no_run
/// use hostgate::args::Args;
/// use clap::Parser;
///
/// let args = Args::parse();
///
/// println!("Listening on {}:{}", args.bind, args.listen);
/// println!("Forwarding to {}:{}", args.bind, args.forward);
/// ```
#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(
    long_about = "A gatekeeper for host-group restricted endpoints\nOnly configured groups of hosts get through to the upstream service\n\nExample usage:\n  hostgate --listen 8080 --forward 9000 --group intranet\n  hostgate -l 8080 -f 9000 -v"
)]
#[command(
    after_help = "Environment variables:\n  HOST_GROUPS            Group definitions, e.g. default=127.0.0.1;intranet=10.0.0.0/8|192.168.1.5\n  HOST_GROUPS_REDIRECT   URL denied clients are redirected to (default: respond 403)"
)]
pub struct Args {
    /// Address to bind to (for both listening and forwarding)
    #[arg(
        long,
        short = 'b',
        help = "Bind address for listening and forwarding",
        value_name = "ADDRESS",
        default_value = "0.0.0.0"
    )]
    pub bind: String,

    /// Port to listen on for incoming requests
    #[arg(
        long,
        short = 'l',
        help = "Listen port for incoming connections",
        value_name = "PORT"
    )]
    pub listen: u16,

    /// Port to forward allowed requests to
    #[arg(
        long,
        short = 'f',
        help = "Destination port for forwarded requests",
        value_name = "PORT"
    )]
    pub forward: u16,

    /// Host group to restrict access to
    #[arg(
        long,
        short = 'g',
        help = "Name of the host group allowed through (empty means 'default')",
        value_name = "GROUP",
        default_value = ""
    )]
    pub group: String,

    /// Enable verbose output
    #[arg(
        long,
        short = 'v',
        help = "Show detailed configuration and startup information"
    )]
    pub verbose: bool,

    /// Enable quiet mode (minimal output)
    #[arg(
        long,
        short = 'q',
        help = "Suppress configuration output, show only essential messages",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output logs in JSON format (for structured logging)
    #[arg(long, help = "Output logs in JSON format for structured logging")]
    pub json_logs: bool,
}

impl Args {
    /// Validates the parsed command line arguments.
    ///
    /// Performs the following validations:
    /// - Listen and forward ports must be different
    /// - Both ports must be greater than 0
    /// - Bind address must be a valid IP address
    ///
    /// # Example
    ///
    /// ```
    /// use hostgate::args::Args;
    /// use clap::Parser;
    ///
    /// let args = Args::try_parse_from(["hostgate", "-l", "8080", "-f", "8080"]).unwrap();
    /// assert!(args.validate().is_err());
    ///
    /// let args = Args::try_parse_from(["hostgate", "-l", "8080", "-f", "9000"]).unwrap();
    /// assert!(args.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if self.listen == self.forward {
            return Err("Listen and forward ports cannot be the same".to_string());
        }

        if self.listen == 0 || self.forward == 0 {
            return Err("Ports must be greater than 0".to_string());
        }

        // Validate bind address format
        if self.bind.parse::<std::net::IpAddr>().is_err() {
            return Err(format!("Invalid bind address: '{}'", self.bind));
        }

        Ok(())
    }
}
