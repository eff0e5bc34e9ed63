//! CLI command implementations.

pub mod cart;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart contents.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product ID.
        id: u64,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product ID.
        id: u64,
    },
    /// Set the quantity of a product already in the cart.
    Set {
        /// Product ID.
        id: u64,
        /// New quantity. Zero or less is ignored.
        #[arg(allow_hyphen_values = true)]
        amount: i64,
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
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
