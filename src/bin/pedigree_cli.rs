//! Pedigree Command Line Interface
//!
//! Terminal front-end over the pedigree components.
//!
//! # Usage
//!
//! ```bash
//! # List horses, optionally filtered
//! pedigree_cli horses --name wen --sex female
//!
//! # Horse details with a three-generation family tree
//! pedigree_cli show 4 --limit 3
//!
//! # Create a horse; references are looked up by name
//! pedigree_cli create-horse --name Thunder --born 2020-01-01 --sex male --owner "anna"
//!
//! # Delete without the prompt
//! pedigree_cli delete-horse 4 --yes
//! ```

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use pedigree::form::{DisplayName, Typeahead};
use pedigree::types::{HorseId, Sex};
use pedigree::ui::FixedAnswer;
use pedigree::{
    AppContext, ClientConfig, Confirmer, HorseDetailView, HorseForm, HorseList, Navigator,
    NotificationKind, Notifier, OwnerForm, OwnerList, QueryState, ReferenceField, Route,
};

#[derive(Parser)]
#[command(name = "pedigree_cli")]
#[command(version = "0.1.0")]
#[command(about = "Manage horses, owners and family trees")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL
    #[arg(long, global = true, env = "PEDIGREE_BACKEND_URL")]
    backend_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search horses
    Horses {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Exact date of birth (YYYY-MM-DD)
        #[arg(long)]
        born: Option<NaiveDate>,
        #[arg(long)]
        sex: Option<Sex>,
        /// Owner name substring
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Show a horse and its family tree
    Show {
        id: HorseId,
        /// Generations to show, the horse itself included
        #[arg(long)]
        limit: Option<String>,
    },

    /// Create a horse
    CreateHorse {
        #[command(flatten)]
        fields: HorseFields,
    },

    /// Edit a horse; omitted fields keep their value
    EditHorse {
        id: HorseId,
        #[command(flatten)]
        fields: HorseFields,
    },

    /// Delete a horse
    DeleteHorse {
        id: HorseId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// List all owners
    Owners,

    /// Create an owner
    CreateOwner {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(clap::Args)]
struct HorseFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    born: Option<NaiveDate>,
    #[arg(long)]
    sex: Option<Sex>,
    /// Owner, looked up by full name substring
    #[arg(long)]
    owner: Option<String>,
    /// Mother, looked up by name
    #[arg(long)]
    mother: Option<String>,
    /// Father, looked up by name
    #[arg(long)]
    father: Option<String>,
}

// =============================================================================
// TERMINAL COLLABORATORS
// =============================================================================

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, kind: NotificationKind, title: &str, body: &str) {
        let label = match kind {
            NotificationKind::Success => "OK".green().bold(),
            NotificationKind::Info => "info".blue().bold(),
            NotificationKind::Error => "error".red().bold(),
        };
        match (title.is_empty(), kind) {
            (true, _) => println!("{} {}", label, body),
            (false, NotificationKind::Error) => eprintln!("{} {}\n{}", label, title.bold(), body),
            (false, _) => println!("{} {}: {}", label, title.bold(), body),
        }
    }
}

struct StdinConfirmer;

#[async_trait]
impl Confirmer for StdinConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        print!("{}? [y/N] ", prompt);
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        match stdin.read_line(&mut line).await {
            Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        debug!("navigate {}", route);
        println!("{} {}", "->".dimmed(), route.to_string().dimmed());
    }
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pedigree=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match cli.backend_url {
        Some(url) => ClientConfig::with_backend_url(url),
        None => ClientConfig::from_env(),
    }
    .context("Invalid configuration")?;

    let confirmer: Arc<dyn Confirmer> = match &cli.command {
        Commands::DeleteHorse { yes: true, .. } => Arc::new(FixedAnswer(true)),
        _ => Arc::new(StdinConfirmer),
    };
    let ctx = AppContext::over_http(
        config,
        Arc::new(TerminalNotifier),
        confirmer,
        Arc::new(TerminalNavigator),
    )?;

    match cli.command {
        Commands::Horses {
            name,
            description,
            born,
            sex,
            owner,
            limit,
        } => {
            let mut list = HorseList::new(ctx);
            if let Some(name) = name {
                list.set_name(&name);
            }
            if let Some(description) = description {
                list.set_description(&description);
            }
            list.set_date_of_birth(born);
            list.set_sex(sex);
            if let Some(owner) = owner {
                list.set_owner_full_name(&owner);
            }
            list.set_limit(limit);
            list.reload().await?;
            print_horses(&list);
        }
        Commands::Show { id, limit } => {
            let query = QueryState { limit };
            let view = HorseDetailView::open(ctx, id, &query).await?;
            print_detail(&view);
        }
        Commands::CreateHorse { fields } => {
            let mut form = HorseForm::open(ctx, &Route::HorseCreate).await?;
            apply_fields(&mut form, fields).await?;
            let horse = form.submit().await?;
            debug!("created {:?}", horse.id);
        }
        Commands::EditHorse { id, fields } => {
            let mut form = HorseForm::open(ctx, &Route::HorseEdit { id }).await?;
            apply_fields(&mut form, fields).await?;
            form.submit().await?;
        }
        Commands::DeleteHorse { id, .. } => {
            let mut form = HorseForm::open(ctx, &Route::horse_detail(id)).await?;
            if !form.delete().await? {
                println!("Nothing deleted.");
            }
        }
        Commands::Owners => {
            let mut list = OwnerList::new(ctx);
            list.reload().await?;
            for owner in list.owners() {
                println!(
                    "{:>4}  {:<30} {}",
                    owner.id.unwrap_or_default(),
                    owner.full_name(),
                    owner.email.as_deref().unwrap_or("").dimmed()
                );
            }
        }
        Commands::CreateOwner {
            first_name,
            last_name,
            email,
        } => {
            let mut form = OwnerForm::new(ctx);
            form.set_first_name(&first_name);
            form.set_last_name(&last_name);
            form.set_email(email.as_deref().unwrap_or(""));
            form.submit().await?;
        }
    }
    Ok(())
}

async fn apply_fields(form: &mut HorseForm, fields: HorseFields) -> anyhow::Result<()> {
    if let Some(name) = fields.name {
        form.set_name(&name);
    }
    if let Some(description) = fields.description {
        form.set_description(&description);
    }
    if fields.born.is_some() {
        form.set_date_of_birth(fields.born);
    }
    if fields.sex.is_some() {
        form.set_sex(fields.sex);
    }

    if let Some(text) = fields.owner {
        form.input(ReferenceField::Owner, &text);
        form.settle(ReferenceField::Owner).await;
        let owner = first_match(form.owner(), "owner", &text)?;
        form.select_owner(owner);
    }
    if let Some(text) = fields.mother {
        form.input(ReferenceField::Mother, &text);
        form.settle(ReferenceField::Mother).await;
        let mother = first_match(form.mother(), "mother", &text)?;
        form.select_mother(mother);
    }
    if let Some(text) = fields.father {
        form.input(ReferenceField::Father, &text);
        form.settle(ReferenceField::Father).await;
        let father = first_match(form.father(), "father", &text)?;
        form.select_father(father);
    }
    Ok(())
}

/// Pick the exact display-name match, else the only suggestion
fn first_match<E: DisplayName + Clone + Send>(
    typeahead: &Typeahead<E>,
    what: &str,
    text: &str,
) -> anyhow::Result<E> {
    if let Some(e) = typeahead.last_error() {
        return Err(anyhow!("{} lookup failed: {}", what, e.display_message()));
    }
    let suggestions = typeahead.suggestions();
    if let Some(exact) = suggestions
        .iter()
        .find(|s| s.display_name().eq_ignore_ascii_case(text.trim()))
    {
        return Ok(exact.clone());
    }
    match suggestions {
        [only] => Ok(only.clone()),
        [] => bail!("no {} matches '{}'", what, text),
        many => bail!(
            "'{}' matches several: {}",
            text,
            many.iter()
                .map(|s| s.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_horses(list: &HorseList) {
    if list.horses().is_empty() {
        println!("{}", "No horses found.".dimmed());
        return;
    }
    for horse in list.horses() {
        let owner = horse
            .owner
            .as_ref()
            .map(|o| o.full_name())
            .unwrap_or_default();
        println!(
            "{:>4}  {:<24} {}  {:<6}  {}",
            horse.id.unwrap_or_default(),
            horse.name.bold(),
            horse.date_of_birth,
            horse.sex,
            owner
        );
    }
}

fn print_detail(view: &HorseDetailView) {
    if let Some(horse) = view.horse() {
        println!("{}", horse.name.bold());
        if let Some(description) = &horse.description {
            println!("  {}", description);
        }
        println!("  Born:   {}", horse.date_of_birth);
        println!("  Sex:    {}", horse.sex);
        println!("  Owner:  {}", view.owner_display());
    }
    let tree = view.tree();
    println!();
    println!(
        "{} ({} generations max)",
        "Family tree".underline(),
        tree.limit()
    );
    for line in tree.lines() {
        println!("{}", line.text());
    }
}
