//! Account CLI Commands
//!
//! Passwords are never taken as flags: they come from `INTAKE_PASSWORD`
//! (and `INTAKE_PASSWORD_CONFIRM` for registration) or from stdin, one per
//! line.

use clap::{Parser, Subcommand};
use intake_login::{LoginForm, RegisterForm, ResetForm, Session};

use crate::Context;
use crate::prompt::secret;

#[derive(Debug, Parser)]
pub struct LoginArgs {
    /// Account email
    #[arg(long, required_unless_present = "biometric")]
    pub email: Option<String>,

    /// Password (prefer the environment over the command line)
    #[arg(long, env = "INTAKE_PASSWORD", hide_env_values = true, hide = true)]
    pub password: Option<String>,

    /// Sign in with the credentials saved for biometric unlock
    #[arg(long, conflicts_with = "email")]
    pub biometric: bool,
}

#[derive(Debug, Parser)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub address: String,

    #[arg(long, env = "INTAKE_PASSWORD", hide_env_values = true, hide = true)]
    pub password: Option<String>,

    #[arg(long, env = "INTAKE_PASSWORD_CONFIRM", hide_env_values = true, hide = true)]
    pub confirm_password: Option<String>,
}

#[derive(Debug, Parser)]
pub struct ResetArgs {
    #[arg(long)]
    pub email: String,
}

#[derive(Debug, Parser)]
pub struct BiometricCli {
    #[command(subcommand)]
    pub command: BiometricSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum BiometricSubcommand {
    /// Turn on biometric login (requires a sensor and a successful scan)
    Enable,
    /// Turn off biometric login and forget saved credentials
    Disable,
    /// Show whether biometric login is enabled and available
    Status,
}

fn signed_in(session: &Session) {
    match &session.display_name {
        Some(name) => println!("Signed in as {name} <{}>", session.email),
        None => println!("Signed in as {}", session.email),
    }
}

pub async fn run_login(ctx: &Context, args: LoginArgs) -> anyhow::Result<()> {
    let flow = ctx.auth_flow();

    let session = if args.biometric {
        flow.sign_in_with_biometric().await?
    } else {
        let email = args.email.unwrap_or_default();
        let password = secret(args.password, "password")?;
        flow.sign_in_with_password(&LoginForm::new(email, password))
            .await?
    };

    signed_in(&session);
    Ok(())
}

pub fn run_logout(ctx: &Context) -> anyhow::Result<()> {
    ctx.auth_flow().sign_out()?;
    println!("Signed out");
    Ok(())
}

pub async fn run_register(ctx: &Context, args: RegisterArgs) -> anyhow::Result<()> {
    let password = secret(args.password, "password")?;
    let confirm_password = secret(args.confirm_password, "password confirmation")?;
    let form = RegisterForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        phone: args.phone,
        address: args.address,
        password,
        confirm_password,
    };

    let session = ctx.auth_flow().register(&form).await?;
    println!("Account created");
    signed_in(&session);
    Ok(())
}

pub async fn run_reset(ctx: &Context, args: ResetArgs) -> anyhow::Result<()> {
    ctx.auth_flow()
        .send_password_reset(&ResetForm::new(args.email.clone()))
        .await?;
    println!(
        "Password reset email sent to {}. Check your inbox.",
        args.email
    );
    Ok(())
}

impl BiometricCli {
    pub async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let flow = ctx.auth_flow();
        match self.command {
            BiometricSubcommand::Enable => {
                flow.enable_biometric().await?;
                println!(
                    "Biometric login enabled. Sign in with a password once to save credentials."
                );
            }
            BiometricSubcommand::Disable => {
                flow.disable_biometric()?;
                println!("Biometric login disabled");
            }
            BiometricSubcommand::Status => {
                let status = flow.biometric_status().await?;
                let yes_no = |b: bool| if b { "yes" } else { "no" };
                println!("enabled:            {}", yes_no(status.enabled));
                println!("supported:          {}", yes_no(status.supported));
                println!("saved credentials:  {}", yes_no(status.has_saved_credentials));
            }
        }
        Ok(())
    }
}
