//! Lookup Console Binary
//!
//! Runs the operator console in a terminal against an in-memory ledger.

use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::RngCore;
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use lookup_console::{
    Console, ConsoleConfig, Content, CookieCredentialStore, CookieJar, Destination, FormField,
    KeyPrompt, MemoryLedger, NotificationKind, View,
};
use lookup_core::{PublicKey, SigningSeed, SEED_LENGTH};

const HELP: &str = "\
commands:
  lookup <barcode>        look up an item
  admin [key]             authenticate (prompts when no key is given)
  home                    go to the home screen
  add-item                open the add-item form
  set <field> <value>     fill a form field (barcode, name, weight, year, colour)
  submit                  submit the add-item form
  dismiss                 clear the notification
  logout                  end the operator session
  show                    redraw the screen
  quit                    exit";

type Lines = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Reads the key from the next terminal line
struct StdinPrompt {
    lines: Lines,
}

#[async_trait]
impl KeyPrompt for StdinPrompt {
    async fn request_key(&self) -> Option<String> {
        print!("secret key: ");
        let _ = io::stdout().flush();
        self.lines.lock().await.recv().await
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    let log_level = env::var("LOOKUP_LOG_LEVEL")
        .unwrap_or_else(|_| "info".into())
        .parse()
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let config = ConsoleConfig::from_env();
    let operator = operator_key();

    let ledger = Arc::new(MemoryLedger::new(operator));
    let jar = Arc::new(CookieJar::new(config.secure_context));
    let credentials = Arc::new(CookieCredentialStore::from_config(Arc::clone(&jar), &config));

    info!(
        operator = %ledger.operator().to_hex(),
        secure_context = jar.is_secure_context(),
        cookie = %credentials.attributes().directives(),
        "Starting lookup console"
    );

    // Terminal input is blocking; forward it line by line from a detached
    // thread so shutting down the runtime never waits on a pending read
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    let lines: Lines = Arc::new(Mutex::new(rx));
    let prompt = Arc::new(StdinPrompt { lines: Arc::clone(&lines) });

    let mut console = Console::new(&config, ledger, credentials, prompt);
    let outcome = console.startup().await;
    info!(?outcome, "Startup authentication finished");

    println!("{HELP}");
    render(&console.view());

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let Some(line) = lines.lock().await.recv().await else {
            break;
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "lookup" => {
                let _ = console.lookup(rest).await;
            }
            "admin" => {
                let provided = (!rest.is_empty()).then_some(rest);
                let _ = console.authenticate(provided).await;
            }
            "home" => {
                let _ = console.navigate(Destination::Home);
            }
            "add-item" => {
                if console.navigate(Destination::AddItem).is_err() {
                    println!("authenticate first (admin <key>)");
                }
            }
            "set" => {
                let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
                match field.parse::<FormField>() {
                    Ok(field) => console.form_mut().set(field, value.trim()),
                    Err(err) => println!("{err}"),
                }
            }
            "submit" => {
                let _ = console.submit_form().await;
            }
            "dismiss" => console.dismiss(),
            "logout" => console.logout(),
            "show" => {}
            other => println!("unknown command: {other} (try help)"),
        }

        render(&console.view());
    }

    info!("Console closed");
}

/// Operator public key from the environment, or a fresh throwaway operator
fn operator_key() -> PublicKey {
    if let Ok(hex) = env::var("LOOKUP_OPERATOR_PUBLIC_KEY") {
        match PublicKey::from_hex(hex.trim()) {
            Ok(key) => return key,
            Err(err) => warn!(error = %err, "Ignoring invalid LOOKUP_OPERATOR_PUBLIC_KEY"),
        }
    }

    let mut bytes = [0u8; SEED_LENGTH];
    OsRng.fill_bytes(&mut bytes);
    let seed = SigningSeed::from_bytes(&bytes).expect("seed has the signing key length");
    println!("generated operator secret key: {}", seed.to_hex().as_str());
    seed.public_key()
}

fn render(view: &View) {
    let mode = if view.privileged { "operator" } else { "public" };
    println!("--- [{}] {} ---", view.screen, mode);

    if view.busy {
        println!("working...");
    }

    let notification = &view.notification;
    if notification.is_visible() {
        let tag = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
            NotificationKind::None => "",
        };
        println!("[{}] {}", tag, notification.text);
    }

    match &view.content {
        Content::Welcome => println!("Scan or type a barcode to verify an item."),
        Content::Item(record) => {
            println!("barcode: {}", record.barcode);
            println!("name:    {}", record.name);
            println!("weight:  {} mg", record.weight_mil);
            println!("year:    {}", record.year);
            println!("colour:  {}", record.colour);
        }
        Content::AddItemForm(form) => {
            println!("barcode: {}", form.barcode);
            println!("name:    {}", form.name);
            println!("weight:  {}", form.weight);
            println!("year:    {}", form.year);
            println!("colour:  {}", form.colour);
        }
        Content::Empty => {}
    }
}
