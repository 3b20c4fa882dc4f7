//! OCHA CLI - order tea from the terminal.
//!
//! Commands:
//! - `ocha login` / `ocha register` / `ocha logout` / `ocha whoami` - Session
//! - `ocha products` - List the catalog
//! - `ocha cart` - Show and edit the cart
//! - `ocha orders` - Order history, the active order, and checkout
//! - `ocha config` - Show configuration

mod commands;
mod context;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, ConfigArgs, LoginArgs, OrdersArgs, RegisterArgs};

/// OCHA CLI - Browse, fill a cart, and place pickup orders
#[derive(Parser)]
#[command(name = "ocha")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Sign out and forget the stored credential
    Logout,

    /// Show who is signed in
    Whoami,

    /// List products
    Products,

    /// Show or edit the cart
    Cart(CartArgs),

    /// List orders or place one
    Orders(OrdersArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Environment from .env, if present
    let _ = dotenvy::dotenv();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config and open local state
    let mut ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Login(args) => commands::auth::login(args, &mut ctx).await,
        Commands::Register(args) => commands::auth::register(args, &mut ctx).await,
        Commands::Logout => commands::auth::logout(&mut ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Products => commands::products::run(&mut ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &mut ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &mut ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,ocha_cli=debug,ocha_sdk=debug,ocha_auth=debug,ocha_commerce=debug,ocha_data=debug,ocha_cache=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
