//! Server startup output for HostGate.

use std::env;

use crate::{args::Args, env_vars};
use hostgate_core::{HostGroupConfig, RedirectProvider};

/// Print startup banner with configuration
pub fn print_startup_info(args: &Args, host_groups: &HostGroupConfig) {
    if args.quiet {
        // Quiet mode: only essential information
        println!(
            "🚀 HostGate v{} starting on port {}",
            env!("CARGO_PKG_VERSION"),
            args.listen
        );
        return;
    }

    // Normal/verbose mode: full configuration display
    println!("🛡️  {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("   {}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("📡 Network Configuration:");
    println!("   Listen Port:    {}", args.listen);
    println!("   Forward Port:   {}", args.forward);
    println!();

    print_group_config(args, host_groups);

    // Show environment configuration in verbose mode
    if args.verbose {
        print_env_config();
    }

    println!();
    println!("🚀 Server starting...");
}

/// Print host group configuration summary
fn print_group_config(args: &Args, host_groups: &HostGroupConfig) {
    println!("🔒 Host Group Configuration:");

    let guarded = if args.group.is_empty() {
        "default"
    } else {
        &args.group
    };
    println!("   Guarded Group:  {guarded}");
    if args.verbose {
        let mut names: Vec<&str> = host_groups.group_names().collect();
        names.sort_unstable();
        println!("   Groups:         {}", names.join(", "));
    } else {
        println!("   Groups:         {} configured", host_groups.group_count());
    }

    match host_groups.redirect_url() {
        Some(url) => println!("   On Deny:        redirect to {url}"),
        None => println!("   On Deny:        403 Forbidden"),
    }

    if host_groups.group_count() == 0 {
        println!("   Warning:        no groups configured, all requests will be denied");
    }
}

/// Print environment variable configuration status (used in verbose mode)
fn print_env_config() {
    println!();
    println!("🔧 Environment Variables:");

    for &var_name in env_vars::all_env_vars() {
        match env::var(var_name) {
            Ok(_) => println!("   {var_name:<22} = [CONFIGURED]"),
            Err(_) => println!("   {var_name:<22} = [NOT SET]"),
        }
    }
}
