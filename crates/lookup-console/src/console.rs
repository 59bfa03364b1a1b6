//! The console: session, screen, notification and busy state in one place
//!
//! Controllers report outcomes; the console is the single point where those
//! outcomes change what the operator sees. Handlers take `&mut self`, so two
//! handlers can never interleave within one console.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::busy::BusyIndicator;
use crate::config::ConsoleConfig;
use crate::controllers::{AuthController, LookupController, LookupRecord, TransactionController};
use crate::credentials::CredentialStore;
use crate::error::{ClientError, Result};
use crate::form::ItemForm;
use crate::ledger::LedgerClient;
use crate::notification::{Notification, Notifier};
use crate::prompt::KeyPrompt;
use crate::screen::{Screen, ScreenMachine, Trigger};
use crate::session::{SecretKey, Session};

const LOOKUP_FOUND: &str = "The barcode is valid. Details about the item follow.";
const LOOKUP_MISSED: &str = "This lookup returned an error. This barcode did not produce results.";
const KEY_REQUIRED: &str = "Secret key is required.";
const AUTH_FAILED: &str = "Authentication failed. Please check your secret key.";
const NOT_AUTHENTICATED: &str = "Private key not found. Please authenticate first.";
const INVALID_COLOUR: &str = "Invalid colour selected.";
const INVALID_FORM: &str = "Please fill in every field. Weight and year must be whole numbers.";
const ITEM_CREATED: &str = "The item was created successfully.";
const ITEM_EXISTS: &str = "Item with this barcode exists already.";
const UNEXPECTED: &str = "An unexpected error happened.";

/// Where the operator can navigate directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    AddItem,
}

/// Result of the silent re-authentication at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupOutcome {
    /// The stored key was accepted; the session is privileged
    Authenticated,
    /// Nothing stored; the session stays public
    NoStoredKey,
    /// The stored key could not be used; the session stays public
    Failed(ClientError),
}

/// What the active screen shows besides the notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Introductory text
    Welcome,
    /// Details of the last lookup
    Item(LookupRecord),
    /// The add-item form, only ever for a privileged session
    AddItemForm(ItemForm),
    /// Nothing
    Empty,
}

/// Snapshot of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub screen: Screen,
    pub privileged: bool,
    pub busy: bool,
    pub notification: Notification,
    pub content: Content,
}

/// Operator console over a ledger
pub struct Console {
    session: Session,
    screen: ScreenMachine,
    notifier: Notifier,
    busy: BusyIndicator,
    form: ItemForm,
    looked_item: Option<LookupRecord>,
    credentials: Arc<dyn CredentialStore>,
    prompt: Arc<dyn KeyPrompt>,
    auth: AuthController,
    transactions: TransactionController,
    lookups: LookupController,
}

impl Console {
    /// Create a console on the home screen with a public session
    pub fn new(
        config: &ConsoleConfig,
        ledger: Arc<dyn LedgerClient>,
        credentials: Arc<dyn CredentialStore>,
        prompt: Arc<dyn KeyPrompt>,
    ) -> Self {
        info!(
            ledger = ledger.description(),
            credentials = credentials.description(),
            notification_ttl_secs = config.notification_ttl.as_secs(),
            "Console initialized"
        );

        Self {
            session: Session::new(),
            screen: ScreenMachine::new(),
            notifier: Notifier::new(config.notification_ttl),
            busy: BusyIndicator::new(),
            form: ItemForm::default(),
            looked_item: None,
            credentials,
            prompt,
            auth: AuthController::new(Arc::clone(&ledger)),
            transactions: TransactionController::new(Arc::clone(&ledger)),
            lookups: LookupController::new(ledger),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The active screen
    pub fn screen(&self) -> Screen {
        self.screen.current()
    }

    /// Whether the session is privileged
    pub fn is_privileged(&self) -> bool {
        self.session.is_privileged()
    }

    /// The visible notification
    pub fn notification(&self) -> Notification {
        self.notifier.current()
    }

    /// Observe the notification slot
    pub fn subscribe_notifications(&self) -> watch::Receiver<Notification> {
        self.notifier.subscribe()
    }

    /// The busy indicator
    pub fn busy(&self) -> &BusyIndicator {
        &self.busy
    }

    /// The add-item form
    pub fn form(&self) -> &ItemForm {
        &self.form
    }

    /// Edit the add-item form
    pub fn form_mut(&mut self) -> &mut ItemForm {
        &mut self.form
    }

    /// The last successful lookup, if any
    pub fn looked_item(&self) -> Option<&LookupRecord> {
        self.looked_item.as_ref()
    }

    /// Snapshot for rendering
    pub fn view(&self) -> View {
        let screen = self.screen();
        let privileged = self.is_privileged();

        let content = match screen {
            Screen::Home => Content::Welcome,
            Screen::Lookup => self
                .looked_item
                .clone()
                .map(Content::Item)
                .unwrap_or(Content::Empty),
            Screen::AddItem if privileged => Content::AddItemForm(self.form.clone()),
            Screen::AddItem | Screen::Void => Content::Empty,
        };

        View {
            screen,
            privileged,
            busy: self.busy.is_busy(),
            notification: self.notification(),
            content,
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Re-authenticate silently from the credential store
    ///
    /// Never prompts and never posts a notification. A stored key that is
    /// malformed is cleared; one the ledger rejected or could not check is
    /// kept for the next attempt.
    pub async fn startup(&mut self) -> StartupOutcome {
        let Some(stored) = self.credentials.load() else {
            debug!("No stored credential");
            return StartupOutcome::NoStoredKey;
        };

        let _busy = self.busy.begin();
        match self.auth.authenticate(stored).await {
            Ok(key) => {
                self.establish(key);
                StartupOutcome::Authenticated
            }
            Err(err) => {
                if err.is_key_error() {
                    warn!(error = %err, "Stored credential is malformed; clearing it");
                    self.credentials.clear();
                } else {
                    info!(error = %err, "Stored credential not accepted");
                }
                StartupOutcome::Failed(err)
            }
        }
    }

    /// Authenticate with `provided`, or prompt the operator when it is blank
    ///
    /// On success the key is stored, the session becomes privileged and the
    /// add-item screen opens. On failure the session is untouched, nothing
    /// is stored and an error is shown.
    pub async fn authenticate(&mut self, provided: Option<&str>) -> Result<()> {
        let key = match self.auth.resolve_key(provided, self.prompt.as_ref()).await {
            Ok(key) => key,
            Err(err) => {
                self.notifier.error(KEY_REQUIRED, true);
                return Err(err);
            }
        };

        let _busy = self.busy.begin();
        match self.auth.authenticate(key).await {
            Ok(key) => {
                self.establish(key);
                Ok(())
            }
            Err(err) => {
                self.notifier.error(AUTH_FAILED, true);
                Err(err)
            }
        }
    }

    /// End the session: clear the stored key and return home
    pub fn logout(&mut self) {
        self.credentials.clear();
        self.session.end();
        self.form.reset();
        self.transition(Trigger::LoggedOut);
    }

    fn establish(&mut self, key: SecretKey) {
        if let Err(err) = self.credentials.save(&key) {
            warn!(error = %err, "Session established without a stored credential");
        }
        self.session.establish(key);
        self.transition(Trigger::Authenticated);
    }

    // =========================================================================
    // Lookup and insertion
    // =========================================================================

    /// Look up `barcode` and show the result
    pub async fn lookup(&mut self, barcode: &str) -> Result<LookupRecord> {
        let _busy = self.busy.begin();
        match self.lookups.lookup(barcode).await {
            Ok(record) => {
                self.looked_item = Some(record.clone());
                self.transition(Trigger::LookupFound);
                self.notifier.success(LOOKUP_FOUND, true);
                Ok(record)
            }
            Err(err) => {
                self.looked_item = None;
                self.transition(Trigger::LookupMissed);
                self.notifier.error(LOOKUP_MISSED, false);
                Err(err)
            }
        }
    }

    /// Submit the add-item form
    ///
    /// The form is cleared whatever the outcome. Success leaves only the
    /// confirmation on screen; any failure keeps the current screen.
    pub async fn submit_form(&mut self) -> Result<()> {
        let form = std::mem::take(&mut self.form);
        let key = self.session.key().cloned().or_else(|| self.credentials.load());

        let _busy = self.busy.begin();
        let result = self.transactions.submit_form(key.as_ref(), &form).await;

        match &result {
            Ok(()) => {
                self.notifier.success(ITEM_CREATED, false);
                self.transition(Trigger::Inserted);
            }
            Err(err) => {
                let text = match err {
                    ClientError::Unauthorized(_) => NOT_AUTHENTICATED,
                    ClientError::InvalidColour(_) => INVALID_COLOUR,
                    ClientError::InvalidField { .. } => INVALID_FORM,
                    ClientError::DuplicateKey(_) => ITEM_EXISTS,
                    _ => UNEXPECTED,
                };
                self.notifier.error(text, true);
                self.transition(Trigger::InsertFailed);
            }
        }

        result
    }

    // =========================================================================
    // Navigation and notifications
    // =========================================================================

    /// Navigate directly; the add-item form requires a privileged session
    pub fn navigate(&mut self, destination: Destination) -> Result<Screen> {
        let trigger = match destination {
            Destination::Home => Trigger::NavigateHome,
            Destination::AddItem => Trigger::NavigateAddItem,
        };

        self.transition(trigger).ok_or_else(|| {
            ClientError::Unauthorized("the add-item form requires an operator session".into())
        })
    }

    /// Clear the notification now
    pub fn dismiss(&mut self) {
        self.notifier.dismiss();
    }

    fn transition(&mut self, trigger: Trigger) -> Option<Screen> {
        let privileged = self.session.is_privileged();
        let next = self.screen.apply(trigger, privileged);
        if next.is_none() {
            debug!(?trigger, screen = %self.screen.current(), "Screen trigger refused");
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{CookieCredentialStore, CookieJar};
    use crate::ledger::MemoryLedger;
    use crate::notification::NotificationKind;
    use crate::prompt::NoPrompt;
    use lookup_core::SigningSeed;

    fn console() -> (Console, String) {
        let config = ConsoleConfig::default();
        let seed = SigningSeed::from_bytes(&[1u8; 32]).unwrap();
        let ledger = Arc::new(MemoryLedger::new(seed.public_key()));
        let jar = Arc::new(CookieJar::new(true));
        let credentials = Arc::new(CookieCredentialStore::from_config(jar, &config));
        let console = Console::new(&config, ledger, credentials, Arc::new(NoPrompt));
        (console, seed.to_hex().to_string())
    }

    #[tokio::test]
    async fn test_initial_view() {
        let (console, _) = console();
        let view = console.view();

        assert_eq!(view.screen, Screen::Home);
        assert!(!view.privileged);
        assert!(!view.busy);
        assert_eq!(view.content, Content::Welcome);
        assert!(!view.notification.is_visible());
    }

    #[tokio::test]
    async fn test_navigation_requires_privilege() {
        let (mut console, key) = console();

        assert!(matches!(
            console.navigate(Destination::AddItem),
            Err(ClientError::Unauthorized(_))
        ));
        assert_eq!(console.screen(), Screen::Home);

        console.authenticate(Some(&key)).await.unwrap();
        console.navigate(Destination::Home).unwrap();
        assert_eq!(console.navigate(Destination::AddItem).unwrap(), Screen::AddItem);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_lookup_outcome_then_expiry() {
        let (mut console, _) = console();
        let mut notifications = console.subscribe_notifications();

        let _ = console.lookup("ZZZ").await;
        notifications.changed().await.unwrap();
        assert_eq!(notifications.borrow_and_update().kind, NotificationKind::Error);

        console.authenticate(Some("zz")).await.unwrap_err();
        notifications.changed().await.unwrap();
        assert_eq!(notifications.borrow_and_update().text, AUTH_FAILED);

        notifications.changed().await.unwrap();
        assert!(!notifications.borrow().is_visible());
    }

    #[tokio::test]
    async fn test_missing_key_posts_error() {
        let (mut console, _) = console();

        assert_eq!(console.authenticate(None).await, Err(ClientError::MissingKey));
        assert_eq!(console.notification().kind, NotificationKind::Error);
        assert!(!console.is_privileged());
    }

    #[tokio::test]
    async fn test_add_item_content_hidden_after_logout() {
        let (mut console, key) = console();
        console.authenticate(Some(&key)).await.unwrap();
        assert!(matches!(console.view().content, Content::AddItemForm(_)));

        console.logout();
        let view = console.view();
        assert_eq!(view.screen, Screen::Home);
        assert!(!view.privileged);
        assert_eq!(view.content, Content::Welcome);
    }
}
