//! [`Args`] definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use service::domain::{
    lease::{self, Draft},
    notification::Filter,
};

/// Console of the lease desk.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command of the console.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manages leases.
    #[command(subcommand)]
    Lease(Lease),

    /// Screens a rental applicant by email.
    Screen {
        /// Email of the applicant.
        email: String,
    },

    /// Renders a page of notifications.
    Notifications(Notifications),

    /// Manages rent payments.
    #[command(subcommand)]
    Payments(Payments),
}

/// Lease [`Command`]s.
#[derive(Debug, Subcommand)]
pub enum Lease {
    /// Shows details of the lease stored in a JSON file.
    Show {
        /// Path to the lease JSON file.
        file: PathBuf,
    },

    /// Renews the lease stored in a JSON file, printing the renewed one.
    Renew {
        /// Path to the lease JSON file.
        file: PathBuf,

        /// New end date (`YYYY-MM-DD`).
        #[arg(long)]
        end_date: String,

        /// Amount added to the monthly rent, negative to lower it.
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        rent_increase: String,

        /// Renewal notes.
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Creates a new lease, printing it as JSON.
    Create(Box<NewLease>),
}

/// Input of a new lease.
#[derive(Debug, clap::Args)]
pub struct NewLease {
    /// Name of the rented property.
    #[arg(long)]
    pub property: String,

    /// Name of the tenant.
    #[arg(long)]
    pub tenant: String,

    /// Start date (`YYYY-MM-DD`).
    #[arg(long)]
    pub start: String,

    /// End date (`YYYY-MM-DD`).
    #[arg(long)]
    pub end: String,

    /// Monthly rent amount.
    #[arg(long)]
    pub rent: String,

    /// Security deposit amount.
    #[arg(long)]
    pub deposit: String,

    /// Kind of the lease.
    #[arg(long = "type", default_value = "FixedTerm")]
    pub kind: lease::Kind,

    /// Allows pets.
    #[arg(long)]
    pub pets: bool,

    /// Pet deposit amount.
    #[arg(long, default_value = "")]
    pub pet_deposit: String,

    /// Number of parking spaces.
    #[arg(long, default_value = "")]
    pub parking: String,

    /// Included utility, may be repeated.
    #[arg(long = "utility")]
    pub utilities: Vec<String>,

    /// Day of a month the rent is due on.
    #[arg(long, default_value = "1")]
    pub due_day: String,

    /// Late fee amount.
    #[arg(long)]
    pub late_fee: String,

    /// Number of days after which the late fee is charged.
    #[arg(long, default_value = "5")]
    pub late_fee_after: String,
}

impl From<NewLease> for Draft {
    fn from(lease: NewLease) -> Self {
        let NewLease {
            property,
            tenant,
            start,
            end,
            rent,
            deposit,
            kind,
            pets,
            pet_deposit,
            parking,
            utilities,
            due_day,
            late_fee,
            late_fee_after,
        } = lease;

        Self {
            property_name: property,
            tenant_name: tenant,
            start_date: start,
            end_date: end,
            monthly_rent: rent,
            security_deposit: deposit,
            kind,
            pets_allowed: pets,
            pet_deposit,
            parking_spaces: parking,
            utilities: utilities.into_iter().collect(),
            due_day,
            late_fee_amount: late_fee,
            late_fee_after,
        }
    }
}

/// Notifications page selection.
#[derive(Debug, clap::Args)]
pub struct Notifications {
    /// Path to the notifications JSON file.
    pub file: PathBuf,

    /// Filter of the notifications.
    #[arg(long, default_value = "all")]
    pub filter: Filter,

    /// Number of notifications on a page after the `--after` cursor.
    #[arg(long)]
    pub first: Option<usize>,

    /// Cursor to render the page after.
    #[arg(long)]
    pub after: Option<String>,

    /// Number of notifications on a page before the `--before` cursor.
    #[arg(long)]
    pub last: Option<usize>,

    /// Cursor to render the page before.
    #[arg(long)]
    pub before: Option<String>,

    /// Marks the notification with the provided ID as read.
    #[arg(long)]
    pub mark_read: Option<String>,
}

/// Rent payments [`Command`]s.
#[derive(Debug, Subcommand)]
pub enum Payments {
    /// Generates rent payments for a month, the current one by default.
    Generate {
        /// Month (`1..=12`).
        #[arg(long)]
        month: Option<u8>,

        /// Year.
        #[arg(long)]
        year: Option<i32>,
    },
}
