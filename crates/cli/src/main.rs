//! Jokroup CLI - storefront and admin console from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse and filter products
//! jk-cli products list --tab best-sellers
//! jk-cli products filter --category women --size M --max 2500
//!
//! # Log in with a demo account
//! jk-cli auth login -e admin@jokroup.com -p admin123
//!
//! # Admin tables
//! jk-cli admin users list --search john
//! ```
//!
//! # Commands
//!
//! - `products` - Listing tabs and the filter panel
//! - `auth` - Login, registration, logout and the current session
//! - `account` - Password change and recovery
//! - `admin` - Users, products and coupons tables, and the dashboard
//!
//! The session is kept in `JOKROUP_SESSION_PATH` between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use jokroup_storefront::AppState;
use jokroup_storefront::config::StorefrontConfig;
use jokroup_storefront::services::AuthService;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod error;

use commands::admin::Resource;
use commands::products::{FilterArgs, TabArg};
use error::CliError;

#[derive(Parser)]
#[command(name = "jk-cli")]
#[command(author, version, about = "Jokroup storefront and admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product listing
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Log in, register or log out
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Account settings
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Admin console (admin accounts only)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// Show a listing tab
    List {
        #[arg(short, long, value_enum, default_value = "all")]
        tab: TabArg,
    },
    /// Apply filters and show the matching products
    Filter {
        /// Category slug (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Subcategory slug (repeatable)
        #[arg(long = "subcategory")]
        subcategories: Vec<String>,
        /// Color (repeatable)
        #[arg(long = "color")]
        colors: Vec<String>,
        /// Size (repeatable)
        #[arg(long = "size")]
        sizes: Vec<String>,
        /// Minimum price in rupees
        #[arg(long)]
        min: Option<u32>,
        /// Maximum price in rupees
        #[arg(long)]
        max: Option<u32>,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create a local account
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Clear the saved session
    Logout,
    /// Show the logged-in account
    Whoami,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Change the password of the logged-in account
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    /// Request a password reset email
    ForgotPassword {
        #[arg(short, long, default_value = "")]
        email: String,
    },
    /// Set a new password using a reset token
    ResetPassword {
        #[arg(long)]
        token: Option<String>,
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: TableAction,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: TableAction,
    },
    /// Manage coupons
    Coupons {
        #[command(subcommand)]
        action: TableAction,
    },
    /// Show the dashboard summary
    Dashboard,
}

#[derive(Subcommand)]
enum TableAction {
    /// Show one page of the table
    List {
        /// Case-insensitive search term
        #[arg(short, long)]
        search: Option<String>,
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Delete a row by ID
    Delete { id: String },
}

/// Initialize Sentry error tracking.
///
/// Returns a guard that must be kept alive for the duration of the program.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "jokroup_storefront=warn,jokroup_admin=warn,jokroup_cli=warn".into()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_reportable() {
                let event_id = sentry::capture_error(&e);
                tracing::error!(error = %e, sentry_event_id = %event_id, "Command failed");
            } else {
                tracing::debug!(error = %e, "Command rejected");
            }
            let _ = writeln!(std::io::stderr(), "Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), CliError> {
    let state = AppState::new(config)?;

    if let Err(e) = AuthService::new(&state).restore() {
        tracing::warn!(error = %e, "Could not restore saved session");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List { tab } => commands::products::list(&state, &mut out, tab).await,
            ProductsAction::Filter {
                categories,
                subcategories,
                colors,
                sizes,
                min,
                max,
            } => {
                let args = FilterArgs {
                    categories,
                    subcategories,
                    colors,
                    sizes,
                    min_price: min,
                    max_price: max,
                };
                commands::products::filter(&state, &mut out, args).await
            }
        },
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&state, &mut out, &email, password).await
            }
            AuthAction::Register {
                first_name,
                last_name,
                email,
                password,
            } => commands::auth::register(&state, &mut out, first_name, last_name, email, password),
            AuthAction::Logout => commands::auth::logout(&state, &mut out),
            AuthAction::Whoami => commands::auth::whoami(&state, &mut out),
        },
        Commands::Account { action } => match action {
            AccountAction::ChangePassword {
                current,
                new,
                confirm,
            } => commands::account::change_password(&state, &mut out, current, new, confirm).await,
            AccountAction::ForgotPassword { email } => {
                commands::account::forgot_password(&state, &mut out, &email).await
            }
            AccountAction::ResetPassword { token, password } => {
                commands::account::reset_password(&state, &mut out, token.as_deref(), password)
                    .await
            }
        },
        Commands::Admin { action } => {
            let (resource, action) = match action {
                AdminAction::Users { action } => (Resource::Users, action),
                AdminAction::Products { action } => (Resource::Products, action),
                AdminAction::Coupons { action } => (Resource::Coupons, action),
                AdminAction::Dashboard => {
                    return commands::admin::dashboard(&state, &mut out).await;
                }
            };
            match action {
                TableAction::List { search, page } => {
                    commands::admin::list(&state, &mut out, resource, search, page).await
                }
                TableAction::Delete { id } => {
                    commands::admin::delete(&state, &mut out, resource, &id).await
                }
            }
        }
    }
}
