use acadewave_cli::{AccountSpec, create_account};
use acadewave_core::BcryptHasher;
use acadewave_db::{PgAccountDirectory, init_db_pool, run_migrations};
use acadewave_models::Role;
use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "acadewave-cli")]
#[command(about = "Acadewave CLI - Administrative tools for Acadewave", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account with any role
    CreateAccount {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// admin, teacher or student
        #[arg(short = 'r', long, default_value = "admin")]
        role: Role,

        /// Leave the account unverified
        #[arg(long)]
        inactive: bool,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateAccount {
            email,
            username,
            password,
            role,
            inactive,
        } => {
            let email = match email {
                Some(email) => email,
                None => Input::new().with_prompt("Email address").interact_text()?,
            };
            let username = match username {
                Some(username) => username,
                None => Input::new().with_prompt("Username").interact_text()?,
            };
            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()?,
            };

            let mut spec = AccountSpec::new(email, username, password, role);
            spec.activate = !inactive;

            let directory = PgAccountDirectory::new(pool);
            let account = create_account(&directory, &BcryptHasher::default(), spec, Utc::now())
                .await
                .context("Error creating account")?;

            println!("\n✅ Account created successfully!");
            println!("   Id: {}", account.id);
            println!("   Email: {}", account.email);
            println!("   Username: {}", account.username);
            println!("   Role: {}", account.role);
            println!("   Verified: {}", account.is_active);
        }
        Commands::Migrate => {
            run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;
            println!("✅ Migrations applied");
        }
    }

    Ok(())
}
