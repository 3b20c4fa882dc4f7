//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod config;
pub mod orders;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email (prompted if omitted).
    #[arg(short, long)]
    pub email: Option<String>,

    /// Read the password from this environment variable instead of prompting.
    #[arg(long, value_name = "VAR")]
    pub password_env: Option<String>,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Account email (prompted if omitted).
    #[arg(short, long)]
    pub email: Option<String>,

    /// Name shown on orders (prompted if omitted).
    #[arg(short = 'n', long)]
    pub display_name: Option<String>,

    /// Read the password from this environment variable instead of prompting.
    #[arg(long, value_name = "VAR")]
    pub password_env: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product, merging with an existing line of the same size.
    Add {
        /// Product ID.
        product: String,

        /// Size (default: M).
        #[arg(short, long)]
        size: Option<String>,

        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,

        /// Unit price in CHF; looked up in the catalog when omitted.
        #[arg(short, long)]
        price: Option<f64>,

        /// Product name; looked up in the catalog when omitted.
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove a product line.
    Remove {
        /// Product ID.
        product: String,

        /// Size of the line to remove.
        #[arg(short, long, default_value = "M")]
        size: String,
    },
    /// Set the quantity of a line; 0 removes it.
    Set {
        /// Product ID.
        product: String,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        /// Size of the line.
        #[arg(short, long, default_value = "M")]
        size: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: Option<OrdersCommand>,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List your orders.
    List,
    /// Show the line items of one order.
    Items {
        /// Order ID.
        order: String,
    },
    /// Show the order currently in progress.
    Active,
    /// Place the cart as an order.
    Place {
        /// Store to pick the order up from.
        #[arg(long)]
        store: String,

        /// Pickup time: RFC 3339 timestamp, or minutes from now (e.g. `+20`).
        #[arg(long, default_value = "+15")]
        pickup: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
}
