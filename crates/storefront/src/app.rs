//! Application state and event handlers.
//!
//! What the browser UI did through framework re-rendering happens here as
//! explicit state-transition functions, one per discrete event: load the
//! catalog, a search keystroke, a search timer firing, a cart mutation, a
//! login/registration/logout. Each handler runs to completion before local
//! state changes, and every per-action failure ends in a notification with
//! the app back at idle - never in an error bubbling out.

use std::sync::Arc;

use rust_decimal::Decimal;
use secrecy::SecretString;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, instrument, warn};

use qkart_core::{CartEntry, CartLineItem, Product, ProductId};

use crate::api::{ApiError, QkartClient};
use crate::api::types::Credentials;
use crate::auth::{LoginForm, RegisterForm};
use crate::cart::{self, MutationPhase};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::notify::{Notifier, Severity, TracingNotifier};
use crate::search::SearchDebouncer;
use crate::session::{FileSessionStore, Session, SessionStore};

/// Warning shown when an unauthenticated user tries to mutate the cart.
pub const LOGIN_TO_ADD: &str = "Login to add an item to the Cart";

/// Warning shown when adding a product that is already in the cart.
pub const ALREADY_IN_CART: &str =
    "Item already in cart. Use the cart sidebar to update quantity or remove item.";

/// Error shown when the cart cannot be fetched for reasons other than a
/// backend-reported 400.
pub const CART_FETCH_FAILED: &str =
    "Could not fetch cart details. Check that the backend is running, reachable and returns valid JSON.";

/// The headless storefront.
///
/// Owns the catalog snapshot, the cart mirror, the optional session, and
/// the search debouncer. All handlers take `&mut self`: within one process
/// events are strictly sequential, matching the single-threaded
/// event-driven model of the original UI. Across processes (or across two
/// app instances) cart mutations race at the network layer with
/// last-write-wins semantics - no sequencing or locking is applied.
pub struct StorefrontApp {
    client: QkartClient,
    notifier: Arc<dyn Notifier>,
    store: Box<dyn SessionStore>,
    session: Option<Session>,
    /// Current catalog snapshot; replaced wholesale by loads and searches.
    catalog: Vec<Product>,
    /// Local mirror of the authoritative server cart, already reconciled.
    cart: Vec<CartLineItem>,
    debouncer: SearchDebouncer,
    search_rx: Option<UnboundedReceiver<String>>,
}

impl StorefrontApp {
    /// Create an app with explicit collaborators.
    ///
    /// The persisted session, if any, is loaded immediately; a corrupt
    /// store is treated as anonymous rather than fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        config: &StorefrontConfig,
        store: Box<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let client = QkartClient::new(config)?;
        let session = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable session store");
            None
        });
        let (debouncer, search_rx) = SearchDebouncer::new(config.debounce);

        Ok(Self {
            client,
            notifier,
            store,
            session,
            catalog: Vec::new(),
            cart: Vec::new(),
            debouncer,
            search_rx: Some(search_rx),
        })
    }

    /// Create an app with the default collaborators: a file session store
    /// at the configured path and a `tracing`-backed notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self> {
        Self::new(
            config,
            Box::new(FileSessionStore::new(config.session_file.clone())),
            Arc::new(TracingNotifier),
        )
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current catalog snapshot.
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// The reconciled cart mirror.
    #[must_use]
    pub fn cart(&self) -> &[CartLineItem] {
        &self.cart
    }

    /// Order total over the cart mirror.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        cart::total(&self.cart)
    }

    /// The active session, if logged in.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Take the receiver that fired search queries arrive on.
    ///
    /// The embedder's event loop reads queries from it and passes each to
    /// [`Self::search_fired`]. Can only be taken once.
    pub fn take_search_events(&mut self) -> Option<UnboundedReceiver<String>> {
        self.search_rx.take()
    }

    // =========================================================================
    // Catalog Events
    // =========================================================================

    /// Load the catalog, and the cart if a session is active.
    ///
    /// On catalog failure the snapshot is emptied (nothing to show) and an
    /// error is surfaced; on cart failure the mirror is left as it was,
    /// with a backend-reported 400 message shown verbatim and anything
    /// else shown as the generic fetch failure.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        match self.client.products().await {
            Ok(catalog) => self.catalog = catalog,
            Err(e) => {
                self.catalog.clear();
                self.notifier.notify(Severity::Error, &e.user_message());
                return;
            }
        }

        let Some(token) = self.session.as_ref().map(|s| s.token.clone()) else {
            return;
        };

        match self.client.cart(&token).await {
            Ok(entries) => {
                self.cart = cart::reconcile(&entries, &self.catalog);
            }
            Err(ApiError::Backend {
                status: 400,
                message,
            }) => {
                self.notifier.notify(Severity::Error, &message);
            }
            Err(e) => {
                debug!(error = %e, "Cart fetch failed");
                self.notifier.notify(Severity::Error, CART_FETCH_FAILED);
            }
        }
    }

    /// Record a search keystroke: re-arm the debounce timer with the text.
    ///
    /// The query fires on the paired receiver after the quiet period, and
    /// only if no further keystroke supersedes it first.
    pub fn search_input(&mut self, text: &str) {
        self.debouncer.input(text);
    }

    /// Perform the search for a fired query, replacing the catalog
    /// snapshot with the filtered result.
    ///
    /// A backend 404 means "nothing matched" and yields an empty snapshot;
    /// other failures also empty the snapshot and surface an error. The
    /// cart mirror is not re-derived here - line items keep the product
    /// data they were reconciled with.
    #[instrument(skip(self))]
    pub async fn search_fired(&mut self, query: &str) {
        match self.client.search(query).await {
            Ok(catalog) => self.catalog = catalog,
            Err(e) => {
                self.catalog.clear();
                self.notifier.notify(Severity::Error, &e.user_message());
            }
        }
    }

    // =========================================================================
    // Cart Events
    // =========================================================================

    /// Add one unit of a product from a catalog card.
    ///
    /// Duplicate prevention applies: if the product is already in the
    /// mirror, the attempt is rejected with a warning and no network call
    /// is made. Returns the terminal phase of the attempt.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_cart(&mut self, product_id: &ProductId) -> MutationPhase {
        debug!(phase = ?MutationPhase::Validating, "Cart mutation");
        let Some(token) = self.session.as_ref().map(|s| s.token.clone()) else {
            self.notifier.notify(Severity::Warning, LOGIN_TO_ADD);
            return MutationPhase::Failed;
        };

        if cart::is_item_in_cart(&self.cart, product_id) {
            self.notifier.notify(Severity::Warning, ALREADY_IN_CART);
            return MutationPhase::Failed;
        }

        self.push_mutation(
            &token,
            CartEntry {
                product_id: product_id.clone(),
                qty: 1,
            },
        )
        .await
    }

    /// Set the absolute quantity of a line item from the cart stepper.
    ///
    /// Quantity 0 is a valid request and deletes the line item
    /// server-side. Returns the terminal phase of the attempt.
    #[instrument(skip(self), fields(product_id = %product_id, qty))]
    pub async fn set_quantity(&mut self, product_id: &ProductId, qty: u32) -> MutationPhase {
        debug!(phase = ?MutationPhase::Validating, "Cart mutation");
        let Some(token) = self.session.as_ref().map(|s| s.token.clone()) else {
            self.notifier.notify(Severity::Warning, LOGIN_TO_ADD);
            return MutationPhase::Failed;
        };

        self.push_mutation(
            &token,
            CartEntry {
                product_id: product_id.clone(),
                qty,
            },
        )
        .await
    }

    /// Post one entry and fold the authoritative response into the mirror.
    ///
    /// No optimistic update: on failure the mirror is untouched and there
    /// is nothing to roll back. Once sent, a mutation cannot be cancelled
    /// or retried automatically.
    async fn push_mutation(&mut self, token: &SecretString, entry: CartEntry) -> MutationPhase {
        debug!(phase = ?MutationPhase::InFlight, "Cart mutation");
        match self.client.upsert_cart(token, &entry).await {
            Ok(entries) => {
                self.cart = cart::reconcile(&entries, &self.catalog);
                debug!(phase = ?MutationPhase::Reconciled, "Cart mutation");
                MutationPhase::Reconciled
            }
            Err(e) => {
                self.notifier.notify(Severity::Error, &e.user_message());
                debug!(phase = ?MutationPhase::Failed, "Cart mutation");
                MutationPhase::Failed
            }
        }
    }

    // =========================================================================
    // Auth Events
    // =========================================================================

    /// Log in with the given form.
    ///
    /// Validation failures surface a warning without a network call.
    /// On success the session is created and persisted; returns whether a
    /// session is now active. Call [`Self::load`] afterwards to populate
    /// the cart mirror.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn login(&mut self, form: &LoginForm) -> bool {
        if let Err(e) = form.validate() {
            self.notifier.notify(Severity::Warning, &e.to_string());
            return false;
        }

        let credentials = Credentials {
            username: form.username.clone(),
            password: form.password.clone(),
        };

        match self.client.login(&credentials).await {
            Ok(payload) => {
                let session = Session {
                    token: SecretString::from(payload.token),
                    username: payload.username,
                    balance: payload.balance.to_string(),
                };
                if let Err(e) = self.store.save(&session) {
                    // The login itself succeeded; persistence is best-effort.
                    warn!(error = %e, "Failed to persist session");
                }
                self.session = Some(session);
                self.notifier
                    .notify(Severity::Success, "Logged in successfully");
                true
            }
            Err(e) => {
                self.notifier.notify(Severity::Error, &e.user_message());
                false
            }
        }
    }

    /// Create an account with the given form.
    ///
    /// Validation failures surface a warning without a network call. A
    /// successful registration does not log the user in.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn register(&mut self, form: &RegisterForm) -> bool {
        if let Err(e) = form.validate() {
            self.notifier.notify(Severity::Warning, &e.to_string());
            return false;
        }

        let credentials = Credentials {
            username: form.username.clone(),
            password: form.password.clone(),
        };

        match self.client.register(&credentials).await {
            Ok(()) => {
                self.notifier
                    .notify(Severity::Success, "Registered successfully");
                true
            }
            Err(e) => {
                self.notifier.notify(Severity::Error, &e.user_message());
                false
            }
        }
    }

    /// Log out: destroy the persisted session and empty the cart mirror.
    ///
    /// The catalog snapshot stays; anonymous browsing continues.
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            self.notifier.notify(Severity::Error, &e.to_string());
        }
        self.session = None;
        self.cart.clear();
        self.debouncer.cancel();
    }
}
