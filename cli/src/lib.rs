//! `intake` command line
//!
//! ## Exit Codes
//! - 0: Success
//! - 1: Invalid input (form validation, bad arguments)
//! - 2: Network or authentication failure
//! - 3: Configuration, storage or internal error

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use intake_client::HttpRestaurantClient;
use intake_core::{ErrorCategory, IntakeConfig, IntakeError};
use intake_login::{
    AuthError, AuthFlow, IdentityToolkitProvider, NoBiometricHardware, SessionStore,
};

pub mod admin_cmd;
pub mod auth_cmd;
mod output;
mod prompt;
pub mod restaurant_cmd;

pub const EXIT_OK: i32 = 0;
pub const EXIT_INVALID: i32 = 1;
pub const EXIT_REMOTE: i32 = 2;
pub const EXIT_LOCAL: i32 = 3;

/// Restaurant intake from the terminal
#[derive(Debug, Parser)]
#[command(name = "intake", version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, clap::Args)]
pub struct GlobalArgs {
    /// Config file (default: $INTAKE_CONFIG or ~/.config/intake/intake.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override api.base_url from the config file
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Log at info level (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate and save a new restaurant
    Add(restaurant_cmd::AddArgs),
    /// Change fields of a saved restaurant
    Edit(restaurant_cmd::EditArgs),
    /// List saved restaurants
    List(restaurant_cmd::ListArgs),
    /// Show one restaurant
    Show(restaurant_cmd::ShowArgs),
    /// Delete a restaurant
    Delete(restaurant_cmd::DeleteArgs),
    /// Print the restaurant key for a name, street and zipcode
    Key(restaurant_cmd::KeyArgs),
    /// Admin dashboard
    Admin(admin_cmd::AdminCli),
    /// Sign in with email and password, or with biometric unlock
    Login(auth_cmd::LoginArgs),
    /// Sign out, keeping biometric preferences
    Logout,
    /// Create an account
    Register(auth_cmd::RegisterArgs),
    /// Send a password reset email
    ResetPassword(auth_cmd::ResetArgs),
    /// Biometric unlock settings
    Biometric(auth_cmd::BiometricCli),
}

impl Cli {
    pub async fn run(self) -> i32 {
        // Key derivation needs neither config nor network.
        if let Command::Key(args) = &self.command {
            return report(restaurant_cmd::run_key(args));
        }

        let ctx = match Context::load(&self.global) {
            Ok(ctx) => ctx,
            Err(err) => return report(Err(err.into())),
        };

        let result = match self.command {
            Command::Add(args) => restaurant_cmd::run_add(&ctx, args).await,
            Command::Edit(args) => restaurant_cmd::run_edit(&ctx, args).await,
            Command::List(args) => restaurant_cmd::run_list(&ctx, args).await,
            Command::Show(args) => restaurant_cmd::run_show(&ctx, args).await,
            Command::Delete(args) => restaurant_cmd::run_delete(&ctx, args).await,
            Command::Key(args) => restaurant_cmd::run_key(&args),
            Command::Admin(cli) => cli.run(&ctx).await,
            Command::Login(args) => auth_cmd::run_login(&ctx, args).await,
            Command::Logout => auth_cmd::run_logout(&ctx),
            Command::Register(args) => auth_cmd::run_register(&ctx, args).await,
            Command::ResetPassword(args) => auth_cmd::run_reset(&ctx, args).await,
            Command::Biometric(cli) => cli.run(&ctx).await,
        };
        report(result)
    }
}

/// Install the stderr log subscriber
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

/// Loaded configuration plus the handles built from it
pub struct Context {
    pub config: IntakeConfig,
}

impl Context {
    pub fn load(global: &GlobalArgs) -> Result<Self, IntakeError> {
        let mut config = match &global.config {
            Some(path) => IntakeConfig::load_from_path(path)?,
            None => IntakeConfig::load()?,
        };

        if let Some(base_url) = &global.base_url {
            config.api.base_url = base_url.clone();
            config.validate()?;
        }

        Ok(Self { config })
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::from_config(&self.config.session)
    }

    /// API client carrying the stored session token, if any
    pub fn api_client(&self) -> anyhow::Result<HttpRestaurantClient> {
        let client = HttpRestaurantClient::new(self.config.api.clone())?;
        match self.session_store().session() {
            Ok(Some(session)) => Ok(client.with_bearer_token(session.id_token)),
            Ok(None) => Ok(client),
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring unreadable session store");
                Ok(client)
            }
        }
    }

    /// Signed-in user id, used as `createdBy`
    pub fn user_id(&self) -> Option<String> {
        self.session_store()
            .session()
            .ok()
            .flatten()
            .map(|s| s.user_id)
    }

    pub fn auth_flow(&self) -> AuthFlow<IdentityToolkitProvider, NoBiometricHardware> {
        AuthFlow::new(
            IdentityToolkitProvider::new(&self.config.auth),
            NoBiometricHardware,
            self.session_store(),
        )
    }
}

/// Exit code for an error category
pub fn exit_code_for(category: ErrorCategory) -> i32 {
    match category {
        ErrorCategory::Validation => EXIT_INVALID,
        ErrorCategory::Network | ErrorCategory::Auth => EXIT_REMOTE,
        ErrorCategory::Config | ErrorCategory::Storage | ErrorCategory::Internal => EXIT_LOCAL,
    }
}

fn category_of(err: &anyhow::Error) -> ErrorCategory {
    if let Some(err) = err.downcast_ref::<IntakeError>() {
        err.category()
    } else if let Some(err) = err.downcast_ref::<AuthError>() {
        err.category()
    } else {
        ErrorCategory::Internal
    }
}

fn report(result: anyhow::Result<()>) -> i32 {
    let Err(err) = result else {
        return EXIT_OK;
    };

    match err.downcast_ref::<IntakeError>() {
        Some(IntakeError::Validation(errors)) => {
            eprintln!("Please fix the following:");
            for issue in errors.issues() {
                eprintln!("  - {issue}");
            }
        }
        Some(IntakeError::Network { .. }) => {
            tracing::debug!(error = ?err, "Request failed");
            eprintln!("Error: {err}");
        }
        _ => eprintln!("Error: {err:#}"),
    }
    exit_code_for(category_of(&err))
}
