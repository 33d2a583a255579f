//! DocVault CLI - Command line interface for password-protected documents.
//!
//! Each document is encrypted under its own password. This tool only
//! prompts, prints and reports errors; all policy lives in the core crates.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use docvault_common::DocumentId;
use docvault_crypto::PasswordCipher;
use docvault_documents::{Document, DocumentRepository, DocumentService};
use docvault_storage::{LocalBlobStore, StoreConfig};

#[derive(Parser)]
#[command(name = "docvault")]
#[command(about = "DocVault - Password-protected document storage")]
#[command(version)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    storage: StorageArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct StorageArgs {
    /// JSON file describing the storage layout.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage root directory (overrides the config file).
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt and store a new document.
    Store {
        /// Document name.
        #[arg(short, long)]
        name: String,

        /// Document text. Read from --file or stdin when omitted.
        #[arg(short, long, conflicts_with = "file")]
        content: Option<String>,

        /// Read the document text from a file.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show a document's metadata and decrypted content.
    Show {
        /// Document id.
        id: String,
    },

    /// List all documents.
    List {
        /// Order by last modification instead of creation.
        #[arg(long)]
        recent: bool,
    },

    /// Search documents by name (case-insensitive).
    Search {
        /// Text to look for in document names.
        query: String,
    },

    /// Replace a document's content.
    Update {
        /// Document id.
        id: String,

        /// New document text. Read from --file or stdin when omitted.
        #[arg(short, long, conflicts_with = "file")]
        content: Option<String>,

        /// Read the new text from a file.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete a document.
    Delete {
        /// Document id.
        id: String,
    },

    /// Change a document's password.
    ChangePassword {
        /// Document id.
        id: String,
    },

    /// Show storage statistics.
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let service = open_service(&cli.storage).await?;

    match cli.command {
        Commands::Store {
            name,
            content,
            file,
        } => cmd_store(&service, &name, content, file).await,

        Commands::Show { id } => cmd_show(&service, &id).await,

        Commands::List { recent } => cmd_list(&service, recent).await,

        Commands::Search { query } => cmd_search(&service, &query).await,

        Commands::Update { id, content, file } => cmd_update(&service, &id, content, file).await,

        Commands::Delete { id } => cmd_delete(&service, &id).await,

        Commands::ChangePassword { id } => cmd_change_password(&service, &id).await,

        Commands::Stats => cmd_stats(&service).await,
    }
}

/// Build the service over the configured local store.
async fn open_service(args: &StorageArgs) -> Result<DocumentService> {
    let mut config = match &args.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(root) = &args.root {
        config.root = root.clone();
    }

    info!("Storage directory: {}", config.root.display());

    let store = LocalBlobStore::with_config(config).context("Failed to open storage")?;
    let repository = DocumentRepository::open(Arc::new(store))
        .await
        .context("Failed to load documents")?;

    Ok(DocumentService::new(
        Arc::new(repository),
        Arc::new(PasswordCipher::new()),
    ))
}

/// Prompt for password securely.
fn prompt_password(prompt: &str) -> Result<String> {
    rpassword::prompt_password(prompt).context("Failed to read password")
}

/// Prompt for a new password twice.
fn prompt_new_password(prompt: &str) -> Result<String> {
    let password = prompt_password(prompt)?;
    let confirm = prompt_password("Confirm password: ")?;

    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }

    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    Ok(password)
}

fn parse_id(id: &str) -> Result<DocumentId> {
    DocumentId::new(id.trim()).context("Invalid document id")
}

/// Document text from the argument, a file, or stdin.
async fn read_content(content: Option<String>, file: Option<PathBuf>) -> Result<String> {
    let text = match (content, file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read content from stdin")?;
            text
        }
    };

    if text.trim().is_empty() {
        anyhow::bail!("Content cannot be empty");
    }

    Ok(text)
}

fn print_summary(index: usize, document: &Document) {
    println!("{}. {} (ID: {})", index + 1, document.name(), document.id());
    println!("   Created: {}", document.created_at());
}

/// Store a new document.
async fn cmd_store(
    service: &DocumentService,
    name: &str,
    content: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Name cannot be empty");
    }

    let content = read_content(content, file).await?;
    let password = prompt_new_password("Enter password: ")?;

    let document = service
        .store_document(name, &content, &password)
        .await
        .context("Failed to store document")?;

    println!("Document stored successfully!");
    println!("  ID: {}", document.id());
    println!("  Name: {}", document.name());
    println!("  Created: {}", document.created_at());

    Ok(())
}

/// Show a document.
async fn cmd_show(service: &DocumentService, id: &str) -> Result<()> {
    let id = parse_id(id)?;

    let Some(document) = service.get_document(&id).await else {
        println!("Document {} not found.", id);
        return Ok(());
    };

    println!("ID: {}", document.id());
    println!("Name: {}", document.name());
    println!("Created: {}", document.created_at());
    println!("Updated: {}", document.updated_at());

    let password = prompt_password("Enter password to view content: ")?;
    match service
        .get_document_content(&id, &password)
        .await
        .context("Failed to read document")?
    {
        Some(content) => {
            println!("\n--- Content ---");
            println!("{}", content);
        }
        None => println!("Document {} was removed.", id),
    }

    Ok(())
}

/// List documents.
async fn cmd_list(service: &DocumentService, recent: bool) -> Result<()> {
    let documents = if recent {
        service.get_documents_updated_recently().await
    } else {
        service.get_all_documents().await
    };

    if documents.is_empty() {
        println!("No documents.");
        return Ok(());
    }

    println!("Total documents: {}\n", documents.len());
    for (i, document) in documents.iter().enumerate() {
        print_summary(i, document);
        if recent {
            println!("   Updated: {}", document.updated_at());
        }
    }

    Ok(())
}

/// Search documents by name.
async fn cmd_search(service: &DocumentService, query: &str) -> Result<()> {
    let documents = service.search_documents_by_name(query.trim()).await;

    if documents.is_empty() {
        println!("No documents match '{}'.", query);
        return Ok(());
    }

    println!("Found {} document(s):\n", documents.len());
    for (i, document) in documents.iter().enumerate() {
        print_summary(i, document);
    }

    Ok(())
}

/// Replace a document's content.
async fn cmd_update(
    service: &DocumentService,
    id: &str,
    content: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let id = parse_id(id)?;
    let content = read_content(content, file).await?;
    let password = prompt_password("Enter password: ")?;

    let document = service
        .update_document_content(&id, &content, &password)
        .await
        .context("Failed to update document")?;

    println!("Document updated: {}", document.id());
    println!("  Updated: {}", document.updated_at());

    Ok(())
}

/// Delete a document.
async fn cmd_delete(service: &DocumentService, id: &str) -> Result<()> {
    let id = parse_id(id)?;

    if service
        .delete_document(&id)
        .await
        .context("Failed to delete document")?
    {
        println!("Document deleted: {}", id);
    } else {
        println!("Document {} not found.", id);
    }

    Ok(())
}

/// Change a document's password.
async fn cmd_change_password(service: &DocumentService, id: &str) -> Result<()> {
    let id = parse_id(id)?;

    let old_password = prompt_password("Enter current password: ")?;
    let new_password = prompt_new_password("Enter new password: ")?;

    if service
        .change_password(&id, &old_password, &new_password)
        .await
        .context("Failed to change password")?
    {
        println!("Password changed successfully!");
    } else {
        println!("Document {} not found.", id);
    }

    Ok(())
}

/// Show statistics.
async fn cmd_stats(service: &DocumentService) -> Result<()> {
    println!("Documents: {}", service.get_document_count().await);

    if let Some(latest) = service.get_documents_updated_recently().await.first() {
        println!("Last modified: {} ({})", latest.name(), latest.updated_at());
    }

    Ok(())
}
