//! Address Book Command Line Interface
//!
//! Drives the address form from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List candidates for a postcode / house number
//! address-book lookup --postcode 1345 --house-number 350
//!
//! # Look up, pick the first candidate and add a person
//! address-book add --postcode 1345 --house-number 350 --select 1 \
//!     --first-name Jane --last-name Doe
//!
//! # Interactive form session
//! address-book session
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::process::ExitCode;
use std::time::Duration;

use address_book::form::{FIRST_NAME, HOUSE_NUMBER, LAST_NAME, POST_CODE};
use address_book::view::{render_book, render_candidates, render_form, ErrorMessage};
use address_book::{
    AddressCollection, AddressForm, Config, HttpAddressLookup, InMemoryAddressBook,
};

#[derive(Parser)]
#[command(name = "address-book")]
#[command(version)]
#[command(about = "Look up addresses by postcode and build an address book")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend origin serving /api/getAddresses
    #[arg(long, global = true, env = "ADDRESS_BOOK_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds (none by default)
    #[arg(long, global = true, env = "ADDRESS_BOOK_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up candidate addresses
    Lookup {
        #[arg(long)]
        postcode: String,
        #[arg(long)]
        house_number: String,
    },

    /// Look up, select a candidate and add a person to it
    Add {
        #[arg(long)]
        postcode: String,
        #[arg(long)]
        house_number: String,
        /// Candidate number (1-based) or address id
        #[arg(long)]
        select: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },

    /// Interactive form session
    Session,
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let format = cli.format;

    let result = match build_lookup(&cli) {
        Ok(lookup) => match cli.command {
            Commands::Lookup {
                postcode,
                house_number,
            } => cmd_lookup(&lookup, &postcode, &house_number, format).await,
            Commands::Add {
                postcode,
                house_number,
                select,
                first_name,
                last_name,
            } => {
                cmd_add(
                    &lookup,
                    &postcode,
                    &house_number,
                    &select,
                    (first_name.as_str(), last_name.as_str()),
                    format,
                )
                .await
            }
            Commands::Session => cmd_session(&lookup).await,
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "ok": false, "error": format!("{:#}", e) }));
            } else {
                eprintln!("{} {:#}", "error:".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "address_book=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_lookup(cli: &Cli) -> Result<HttpAddressLookup> {
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config = config
            .with_base_url(base_url)
            .context("Invalid --base-url")?;
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    tracing::debug!(base_url = config.base_url_str(), "configuration loaded");

    HttpAddressLookup::new(&config).context("Failed to create HTTP client")
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn lookup_into(
    form: &mut AddressForm,
    lookup: &HttpAddressLookup,
    postcode: &str,
    house_number: &str,
) -> Result<()> {
    form.on_change(POST_CODE, postcode);
    form.on_change(HOUSE_NUMBER, house_number);
    form.submit_lookup(lookup).await;
    match form.error_message() {
        Some(message) => Err(anyhow!(message)),
        None => Ok(()),
    }
}

async fn cmd_lookup(
    lookup: &HttpAddressLookup,
    postcode: &str,
    house_number: &str,
    format: OutputFormat,
) -> Result<()> {
    let mut form = AddressForm::new();
    lookup_into(&mut form, lookup, postcode, house_number).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(form.candidates())?);
        }
        OutputFormat::Pretty => {
            if form.candidates().is_empty() {
                println!("{}", "No addresses found".yellow());
            } else {
                println!("{}", render_candidates(form.candidates(), None));
            }
        }
    }
    Ok(())
}

async fn cmd_add(
    lookup: &HttpAddressLookup,
    postcode: &str,
    house_number: &str,
    select: &str,
    (first_name, last_name): (&str, &str),
    format: OutputFormat,
) -> Result<()> {
    let mut form = AddressForm::new();
    let mut book = InMemoryAddressBook::new();

    lookup_into(&mut form, lookup, postcode, house_number).await?;

    let id = resolve_selection(&form, select)
        .with_context(|| format!("No candidate matches {:?}", select))?;
    form.select(&id);
    form.on_change(FIRST_NAME, first_name);
    form.on_change(LAST_NAME, last_name);

    let entry = form.submit_person(&mut book)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
        OutputFormat::Pretty => println!("{} {}", "Added".green().bold(), entry),
    }
    Ok(())
}

/// `set <field> <value>`; only fields the form declares can be written.
fn set_field(form: &mut AddressForm, rest: &str) -> Result<(), String> {
    match rest.split_once(' ') {
        Some((field, value)) if form.fields().is_declared(field) => {
            form.on_change(field, value.trim());
            Ok(())
        }
        Some((field, _)) => Err(format!("unknown field {:?}", field)),
        None => Err("usage: set <field> <value>".to_string()),
    }
}

/// Accept a 1-based candidate number or a literal id.
fn resolve_selection(form: &AddressForm, arg: &str) -> Option<String> {
    let candidates = form.candidates();
    if let Ok(n) = arg.parse::<usize>() {
        if let Some(address) = n.checked_sub(1).and_then(|i| candidates.get(i)) {
            return Some(address.id.clone());
        }
    }
    candidates
        .iter()
        .find(|a| a.id == arg)
        .map(|a| a.id.clone())
}

// =============================================================================
// SESSION
// =============================================================================

const SESSION_HELP: &str = "\
Commands:
  set <field> <value>   set a field (postCode, houseNumber, firstName, lastName)
  find                  look up addresses for the current postcode/house number
  select <n|id>         select a candidate
  add                   add the selected address with the entered names
  clear                 clear all fields, candidates and errors
  book                  show the address book
  remove <id>           remove an address from the book
  show                  show the form
  help                  this text
  quit                  leave";

async fn cmd_session(lookup: &HttpAddressLookup) -> Result<()> {
    let mut editor = DefaultEditor::new().context("Failed to start line editor")?;
    let mut form = AddressForm::new();
    let mut book = InMemoryAddressBook::new();

    println!("{}", "Create your own address book!".bold());
    println!("{}", SESSION_HELP.dimmed());

    loop {
        let line = match editor.readline("address-book> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line);

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "quit" | "exit" => break,
            "help" => println!("{}", SESSION_HELP),
            "show" => println!("{}", render_form(&form)),
            "set" => {
                if let Err(message) = set_field(&mut form, rest) {
                    println!("{}", message.red());
                }
            }
            "find" => {
                form.submit_lookup(lookup).await;
                print_error(&form);
                if !form.candidates().is_empty() {
                    println!("{}", render_candidates(form.candidates(), form.selected_id()));
                } else if form.error().is_none() {
                    println!("{}", "No addresses found".yellow());
                }
            }
            "select" => match resolve_selection(&form, rest) {
                Some(id) => {
                    form.select(&id);
                    println!("{}", render_candidates(form.candidates(), form.selected_id()));
                }
                None => println!("{}", format!("no candidate {:?}", rest).red()),
            },
            "add" => match form.submit_person(&mut book) {
                Ok(entry) => println!("{} {}", "Added".green().bold(), entry),
                Err(_) => print_error(&form),
            },
            "clear" => {
                form.clear_fields();
                println!("{}", "Cleared".dimmed());
            }
            "book" => println!("{}", render_book(book.addresses())),
            "remove" => {
                if rest.is_empty() {
                    println!("{}", "usage: remove <id>".red());
                } else {
                    let removed = book.remove_address(rest);
                    println!("removed {}", removed);
                }
            }
            other => println!("{}", format!("unknown command {:?}, try help", other).red()),
        }
    }

    if book.is_empty() {
        return Ok(());
    }
    println!("{}", render_book(book.addresses()));
    Ok(())
}

fn print_error(form: &AddressForm) {
    let message = form.error_message().unwrap_or_default();
    let error = ErrorMessage(&message);
    if error.is_visible() {
        println!("{}", error.to_string().red());
    }
}
