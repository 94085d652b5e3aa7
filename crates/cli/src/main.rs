//! Museum Cart CLI - the shop cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of a catalog item
//! museum-cart add --id poster --name "Gallery Poster" --price 30
//!
//! # Remove one unit
//! museum-cart remove poster
//!
//! # Show the cart and invoice as a member, choosing the volume discount
//! museum-cart show --member --discount volume
//!
//! # Quantity badges for catalog entries
//! museum-cart badges poster pin mug
//!
//! # Empty the cart
//! museum-cart clear
//! ```
//!
//! Without `--discount`, `show` asks on stdin when both the member and the
//! volume discount qualify. End of input counts as dismissing the prompt.
//!
//! Configuration comes from `CART_*` environment variables (see
//! `museum_cart::config`); logs go to stderr, filtered by `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use museum_cart::pricing::always;
use museum_cart::{CartConfig, CartSession, CartStore, DiscountChoice, FileStorage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "museum-cart")]
#[command(author, version, about = "Museum shop cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a catalog item
    Add {
        /// Catalog item id
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price in dollars
        #[arg(long)]
        price: String,

        /// Image reference
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove one unit of a catalog item
    Remove {
        /// Catalog item id
        id: String,
    },
    /// Empty the cart and reset membership
    Clear,
    /// Show cart rows and the invoice
    Show {
        /// Price as a member
        #[arg(long)]
        member: bool,

        /// Answer the discount prompt up front
        #[arg(long, value_enum)]
        discount: Option<DiscountArg>,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show quantity badges for catalog entries
    Badges {
        /// Catalog item ids
        #[arg(required = true)]
        ids: Vec<String>,

        /// Print badges as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Discount answer given on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum DiscountArg {
    Member,
    Volume,
    None,
}

impl From<DiscountArg> for Option<DiscountChoice> {
    fn from(arg: DiscountArg) -> Self {
        match arg {
            DiscountArg::Member => Some(DiscountChoice::Member),
            DiscountArg::Volume => Some(DiscountChoice::Volume),
            DiscountArg::None => None,
        }
    }
}

fn main() {
    // Logs go to stderr so stdout carries only the rendered cart
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "museum_cart=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let store = CartStore::with_key(FileStorage::new(&config.store_dir), config.store_key);
    let mut session = CartSession::new(store, config.pricing);
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Add {
            id,
            name,
            price,
            image,
        } => commands::add(&session, &mut out, &id, &name, &price, image.as_deref())?,
        Commands::Remove { id } => commands::remove(&session, &mut out, &id)?,
        Commands::Clear => commands::clear(&mut session, &mut out)?,
        Commands::Show {
            member,
            discount,
            json,
        } => {
            session.set_member(member);
            let output = commands::Output::from_json_flag(json);
            match discount {
                Some(arg) => {
                    let mut answer = always(arg.into());
                    commands::show(&session, &mut out, &mut answer, output)?;
                }
                None => {
                    let mut prompt =
                        commands::StdinPrompt::new(std::io::stdin().lock(), std::io::stderr());
                    commands::show(&session, &mut out, &mut prompt, output)?;
                }
            }
        }
        Commands::Badges { ids, json } => {
            let output = commands::Output::from_json_flag(json);
            commands::badges(&session, &mut out, &ids, output)?;
        }
    }
    Ok(())
}
