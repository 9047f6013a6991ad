//! Openbank CLI
//!
//! Command-line interface for the Stone Openbank PIX API.

use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use openbank_client::{ClientConfig, Environment, OpenBankClient};
use openbank_types::{
    ConfirmPendingPaymentRequest, CreateDynamicQrCodeRequest, CreatePendingPaymentRequest,
    Customer, GetQrCodeRequest,
};

#[derive(Parser)]
#[command(name = "openbank")]
#[command(author, version, about = "Stone Openbank PIX CLI client", long_about = None)]
struct Cli {
    /// Target environment (sandbox, production)
    #[arg(long, env = "OPENBANK_ENVIRONMENT", default_value = "sandbox")]
    environment: String,

    /// Base URL override, e.g. for a local mock server
    #[arg(long, env = "OPENBANK_API_URL")]
    api_url: Option<String>,

    /// Bearer access token
    #[arg(long, env = "OPENBANK_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "OPENBANK_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Outbound payment lookups
    Outbound {
        #[command(subcommand)]
        action: OutboundCommands,
    },
    /// QR-code operations
    Qrcode {
        #[command(subcommand)]
        action: QrCodeCommands,
    },
    /// PIX key entries
    Entries {
        #[command(subcommand)]
        action: EntriesCommands,
    },
    /// Pending payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
}

#[derive(Subcommand)]
enum OutboundCommands {
    /// Get an outbound payment
    Get {
        /// Payment ID
        id: String,
    },
}

#[derive(Subcommand)]
enum QrCodeCommands {
    /// Decode a BR-code
    Resolve {
        /// BR-code string ("copia e cola")
        brcode: String,
        #[arg(long)]
        owner_account: Option<String>,
        /// Intended payment date (YYYY-MM-DD)
        #[arg(long)]
        payment_date: Option<NaiveDate>,
    },
    /// Create a dynamic QR-code for receiving a payment
    Create {
        #[arg(long)]
        account_id: String,
        /// PIX key that receives the payment
        #[arg(long)]
        key: String,
        /// Amount in centavos
        #[arg(long)]
        amount: i64,
        #[arg(long)]
        transaction_id: String,
        #[arg(long)]
        customer_name: String,
        #[arg(long)]
        customer_document: String,
        /// Message shown to the payer
        #[arg(long)]
        request_for_payer: Option<String>,
        #[arg(long)]
        idempotency_key: Option<String>,
    },
}

#[derive(Subcommand)]
enum EntriesCommands {
    /// List PIX keys registered to an account
    List {
        /// Account ID
        account_id: String,
        #[arg(long)]
        idempotency_key: Option<String>,
    },
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Create a pending payment
    Create {
        #[arg(long)]
        account_id: String,
        /// Amount in centavos
        #[arg(long)]
        amount: i64,
        /// Recipient PIX key
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        transaction_id: Option<String>,
        #[arg(long)]
        idempotency_key: Option<String>,
    },
    /// Confirm a pending payment
    Confirm {
        /// Payment ID
        id: String,
        /// Amount in centavos
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value = "")]
        description: String,
        /// Save the recipient to the account's contacts
        #[arg(long)]
        add_to_contacts: bool,
        #[arg(long)]
        idempotency_key: Option<String>,
    },
}

fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let environment: Environment = cli.environment.parse()?;
    let mut config =
        ClientConfig::new(environment).with_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url);
    }
    if let Some(token) = &cli.access_token {
        config = config.with_access_token(token);
    }
    Ok(config)
}

/// Uses the caller's key, or a fresh UUID so retries stay visible in logs.
fn idempotency_key(key: Option<String>) -> String {
    key.unwrap_or_else(|| {
        let key = uuid::Uuid::new_v4().to_string();
        tracing::info!(idempotency_key = %key, "Generated idempotency key");
        key
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,openbank_cli=info,openbank_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = OpenBankClient::new(build_config(&cli)?)?;
    let pix = client.pix();

    match cli.command {
        Commands::Outbound { action } => match action {
            OutboundCommands::Get { id } => {
                let resp = pix.get_outbound_pix(&id).await?;
                println!("{}", serde_json::to_string_pretty(&resp.value)?);
            }
        },

        Commands::Qrcode { action } => match action {
            QrCodeCommands::Resolve {
                brcode,
                owner_account,
                payment_date,
            } => {
                let input = GetQrCodeRequest {
                    brcode,
                    owner_account,
                    payment_date,
                };
                let resp = pix.get_qr_code_data(&input).await?;
                println!("{}", serde_json::to_string_pretty(&resp.value)?);
            }
            QrCodeCommands::Create {
                account_id,
                key,
                amount,
                transaction_id,
                customer_name,
                customer_document,
                request_for_payer,
                idempotency_key: key_arg,
            } => {
                let input = CreateDynamicQrCodeRequest {
                    amount: amount.to_string(),
                    account_id,
                    key,
                    transaction_id,
                    customer: Customer::new(customer_name, customer_document),
                    request_for_payer,
                };
                let resp = pix
                    .create_dynamic_qr_code(&input, &idempotency_key(key_arg))
                    .await?;
                println!("{}", serde_json::to_string_pretty(&resp.value)?);
            }
        },

        Commands::Entries { action } => match action {
            EntriesCommands::List {
                account_id,
                idempotency_key: key_arg,
            } => {
                let resp = pix
                    .get_entries(&account_id, &idempotency_key(key_arg))
                    .await?;
                println!("{}", serde_json::to_string_pretty(&resp.value)?);
            }
        },

        Commands::Payment { action } => match action {
            PaymentCommands::Create {
                account_id,
                amount,
                key,
                description,
                transaction_id,
                idempotency_key: key_arg,
            } => {
                let input = CreatePendingPaymentRequest {
                    account_id: Some(account_id),
                    amount: Some(amount),
                    description,
                    transaction_id,
                    key,
                    source: None,
                };
                let resp = pix
                    .create_pending_payment(&input, &idempotency_key(key_arg))
                    .await?;
                println!("{}", serde_json::to_string_pretty(&resp.value)?);
            }
            PaymentCommands::Confirm {
                id,
                amount,
                description,
                add_to_contacts,
                idempotency_key: key_arg,
            } => {
                let input = ConfirmPendingPaymentRequest {
                    amount,
                    description,
                    add_target_to_contacts: add_to_contacts,
                };
                let resp = pix
                    .confirm_pending_payment(&id, &input, &idempotency_key(key_arg))
                    .await?;
                println!("✓ Payment {} confirmed ({})", id, resp.status());
            }
        },
    }

    Ok(())
}
