use anyhow::Result;
use clap::{Parser, Subcommand};
use facilita_application::AppContext;
use facilita_core::user::UserRole;
use facilita_infrastructure::FacilitaConfig;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "facilita")]
#[command(about = "Facilita Hub - book home services, chat with providers, pay and review", long_about = None)]
struct Cli {
    /// Directory holding the JSON data files (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to config.toml (default: platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email, password and role
    Login {
        email: String,
        password: String,
        /// customer, provider or administrator
        #[arg(long, default_value = "customer", value_parser = parse_role)]
        role: UserRole,
    },
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Eleven digits, with or without punctuation
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long, value_parser = parse_role)]
        role: UserRole,
        /// Accept the terms of use
        #[arg(long)]
        accept_terms: bool,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Search the service catalog
    Services {
        /// Text matched against service names
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        category: Option<String>,
        /// List the catalog's categories instead of services
        #[arg(long, conflicts_with_all = ["query", "category"])]
        categories: bool,
    },
    /// Service requests
    Request {
        #[command(subcommand)]
        action: RequestAction,
    },
    /// Conversations about a request
    Chat {
        #[command(subcommand)]
        action: ChatAction,
    },
    /// Payments for completed requests
    Payment {
        #[command(subcommand)]
        action: PaymentAction,
    },
    /// Rate the provider of a completed request
    Review {
        request_id: String,
        /// 1 to 5
        rating: u8,
        #[arg(default_value = "")]
        comment: String,
    },
    /// Provider or administrator overview
    Dashboard,
}

#[derive(Subcommand)]
enum RequestAction {
    /// Book a service
    Create {
        service_id: String,
        #[arg(long)]
        address: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        time: String,
        #[arg(long)]
        description: String,
    },
    /// List your requests
    List,
    /// Show one request
    Show { request_id: String },
    /// Accept a pending request (provider)
    Accept { request_id: String },
    /// Decline a pending request (provider)
    Reject { request_id: String },
    /// Start an accepted request (provider)
    Start { request_id: String },
    /// Finish a request in progress (provider)
    Complete { request_id: String },
    /// Cancel your request (customer)
    Cancel { request_id: String },
}

#[derive(Subcommand)]
enum ChatAction {
    /// Show the conversation of a request
    Open { request_id: String },
    /// Send a message in a conversation
    Send {
        conversation_id: String,
        text: String,
    },
    /// List your conversations
    Inbox,
}

#[derive(Subcommand)]
enum PaymentAction {
    /// Ask for payment of a completed request (provider)
    Request { request_id: String },
    /// Settle a pending payment (customer)
    Settle {
        payment_id: String,
        /// Record the payment as failed instead of paid
        #[arg(long)]
        failed: bool,
    },
}

fn parse_role(value: &str) -> Result<UserRole, String> {
    UserRole::from_str(value)
        .map_err(|_| format!("unknown role '{}' (customer, provider, administrator)", value))
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<FacilitaConfig> {
    let mut config = match &cli.config {
        Some(path) => FacilitaConfig::load_from(path)?,
        None => FacilitaConfig::load_default()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.log_level);

    let ctx = Arc::new(AppContext::open(&config)?);

    match cli.command {
        Commands::Login {
            email,
            password,
            role,
        } => commands::auth::login(&ctx, &email, &password, role).await?,
        Commands::Signup {
            name,
            email,
            phone,
            password,
            confirm_password,
            role,
            accept_terms,
        } => {
            let form = facilita_core::auth::SignupForm {
                name,
                email,
                phone,
                password,
                confirm_password,
                role: Some(role),
                accept_terms,
            };
            commands::auth::signup(&ctx, &form).await?
        }
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await?,
        Commands::Services {
            query,
            category,
            categories,
        } => {
            if categories {
                commands::services::categories(&ctx).await
            } else {
                commands::services::search(&ctx, &query, category).await
            }
        }
        Commands::Request { action } => match action {
            RequestAction::Create {
                service_id,
                address,
                date,
                time,
                description,
            } => {
                let form = facilita_application::RequestForm {
                    service_id,
                    address,
                    scheduled_date: date,
                    scheduled_time: time,
                    description,
                };
                commands::request::create(&ctx, form).await?
            }
            RequestAction::List => commands::request::list(&ctx).await?,
            RequestAction::Show { request_id } => commands::request::show(&ctx, &request_id).await?,
            RequestAction::Accept { request_id } => {
                commands::request::transition(&ctx, &request_id, commands::request::Step::Accept)
                    .await?
            }
            RequestAction::Reject { request_id } => {
                commands::request::transition(&ctx, &request_id, commands::request::Step::Reject)
                    .await?
            }
            RequestAction::Start { request_id } => {
                commands::request::transition(&ctx, &request_id, commands::request::Step::Start)
                    .await?
            }
            RequestAction::Complete { request_id } => {
                commands::request::transition(
                    &ctx,
                    &request_id,
                    commands::request::Step::Complete,
                )
                .await?
            }
            RequestAction::Cancel { request_id } => {
                commands::request::transition(&ctx, &request_id, commands::request::Step::Cancel)
                    .await?
            }
        },
        Commands::Chat { action } => match action {
            ChatAction::Open { request_id } => commands::chat::open(&ctx, &request_id).await?,
            ChatAction::Send {
                conversation_id,
                text,
            } => commands::chat::send(&ctx, &conversation_id, &text).await?,
            ChatAction::Inbox => commands::chat::inbox(&ctx).await?,
        },
        Commands::Payment { action } => match action {
            PaymentAction::Request { request_id } => {
                commands::payment::request(&ctx, &request_id).await?
            }
            PaymentAction::Settle { payment_id, failed } => {
                commands::payment::settle(&ctx, &payment_id, !failed).await?
            }
        },
        Commands::Review {
            request_id,
            rating,
            comment,
        } => commands::request::review(&ctx, &request_id, rating, &comment).await?,
        Commands::Dashboard => commands::dashboard::show(&ctx).await?,
    }

    Ok(())
}
