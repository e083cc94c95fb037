//! Product page lifecycle: `Idle → Loading → {Ready | Errored}`.
//!
//! Every navigation starts two independent tasks, variant resolution and the
//! featured-products fetch, and tags them with a fresh [`Ticket`]. Their
//! results come back over a channel; anything carrying an older ticket is
//! dropped, so a slow response for a previous URL can never overwrite the
//! page for the current one.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use gadgets_catalog::{resolve_variant, FetchError, ProductPath, ProductRepository, ResolveError, ResolvedProduct};
use gadgets_core::{AppConfig, ImageCursorInit, ProductSummary};

use crate::cart::Cart;
use crate::detail::DetailViewModel;
use crate::favorites::Favorites;
use crate::view::{PageView, ProductDetailView, RelatedProducts, ERROR_DESCRIPTION, UNKNOWN_PRODUCT_NAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    Idle,
    Loading,
    Ready,
    Errored,
}

/// Identifies one navigation. Strictly increasing per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug)]
pub(crate) struct PageEvent {
    ticket: Ticket,
    outcome: Outcome,
}

#[derive(Debug)]
enum Outcome {
    Detail(Result<ResolvedProduct, ResolveError>),
    Featured(Result<Vec<ProductSummary>, FetchError>),
}

/// Whether an incoming task result was applied to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Applied,
    Discarded,
}

#[derive(Debug, Clone)]
pub struct PageSettings {
    pub image_cursor: ImageCursorInit,
    pub asset_prefix: String,
}

impl PageSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            image_cursor: config.image_cursor,
            asset_prefix: config.asset_prefix.clone(),
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            image_cursor: ImageCursorInit::default(),
            asset_prefix: "/new/".to_owned(),
        }
    }
}

/// Drives one product page against a repository.
///
/// Dropping the controller aborts any fetch still in flight.
pub struct PageController<R> {
    repo: Arc<R>,
    settings: PageSettings,
    events_tx: mpsc::UnboundedSender<PageEvent>,
    events_rx: mpsc::UnboundedReceiver<PageEvent>,
    // Tasks of the current navigation only. Dropping a `JoinSet` aborts its tasks.
    tasks: JoinSet<()>,
    ticket: Ticket,
    path: Option<ProductPath>,
    detail: Option<Result<DetailViewModel, ResolveError>>,
    featured: Option<Option<Vec<ProductSummary>>>,
}

impl<R: ProductRepository + 'static> PageController<R> {
    #[must_use]
    pub fn new(repo: Arc<R>, settings: PageSettings) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            repo,
            settings,
            events_tx,
            events_rx,
            tasks: JoinSet::new(),
            ticket: Ticket(0),
            path: None,
            detail: None,
            featured: None,
        }
    }

    /// Points the page at a new route and starts both fetches.
    ///
    /// Must be called from within a tokio runtime. Fetches still running for
    /// an earlier route are aborted; results they already sent are discarded
    /// when processed.
    pub fn navigate(&mut self, route: &str) -> Ticket {
        self.ticket = Ticket(self.ticket.0 + 1);
        let ticket = self.ticket;
        let path = ProductPath::parse(route);

        tracing::debug!(ticket = ticket.0, path = %path, "navigating product page");

        self.path = Some(path.clone());
        self.detail = None;
        self.featured = None;
        self.tasks = JoinSet::new();

        let repo = Arc::clone(&self.repo);
        let tx = self.events_tx.clone();
        self.tasks.spawn(async move {
            let outcome = resolve_variant(repo.as_ref(), &path).await;
            tx.send(PageEvent {
                ticket,
                outcome: Outcome::Detail(outcome),
            })
            .ok();
        });

        let repo = Arc::clone(&self.repo);
        let tx = self.events_tx.clone();
        self.tasks.spawn(async move {
            let outcome = repo.fetch_featured().await;
            tx.send(PageEvent {
                ticket,
                outcome: Outcome::Featured(outcome),
            })
            .ok();
        });

        ticket
    }

    #[must_use]
    pub fn phase(&self) -> PagePhase {
        if self.path.is_none() {
            return PagePhase::Idle;
        }
        match (&self.detail, &self.featured) {
            (Some(Ok(_)), Some(_)) => PagePhase::Ready,
            (Some(Err(_)), Some(_)) => PagePhase::Errored,
            _ => PagePhase::Loading,
        }
    }

    #[must_use]
    pub fn current_path(&self) -> Option<&ProductPath> {
        self.path.as_ref()
    }

    #[must_use]
    pub fn current_ticket(&self) -> Ticket {
        self.ticket
    }

    /// The resolved variant, as soon as resolution succeeds. Does not wait for
    /// the featured fetch.
    #[must_use]
    pub fn detail(&self) -> Option<&DetailViewModel> {
        self.detail.as_ref().and_then(|d| d.as_ref().ok())
    }

    pub fn detail_mut(&mut self) -> Option<&mut DetailViewModel> {
        self.detail.as_mut().and_then(|d| d.as_mut().ok())
    }

    #[must_use]
    pub fn error(&self) -> Option<&ResolveError> {
        self.detail.as_ref().and_then(|d| d.as_ref().err())
    }

    /// Featured products for the current route, once fetched. `None` while
    /// loading or when the fetch failed.
    #[must_use]
    pub fn featured(&self) -> Option<&[ProductSummary]> {
        self.featured.as_ref().and_then(|f| f.as_deref())
    }

    /// Applies a task result if it belongs to the current navigation.
    pub(crate) fn apply(&mut self, event: PageEvent) -> EventDisposition {
        if event.ticket != self.ticket {
            tracing::debug!(
                event_ticket = event.ticket.0,
                current_ticket = self.ticket.0,
                "discarding stale page result"
            );
            return EventDisposition::Discarded;
        }

        match event.outcome {
            Outcome::Detail(Ok(resolved)) => {
                self.detail = Some(Ok(DetailViewModel::new(
                    resolved,
                    self.settings.image_cursor,
                )));
            }
            Outcome::Detail(Err(err)) => {
                tracing::warn!(
                    error = %err,
                    code = err.code(),
                    path = ?self.path.as_ref().map(ToString::to_string),
                    "product resolution failed"
                );
                self.detail = Some(Err(err));
            }
            Outcome::Featured(Ok(products)) => {
                self.featured = Some(Some(products));
            }
            Outcome::Featured(Err(err)) => {
                tracing::warn!(error = %err, "Could not fetch shuffled products");
                self.featured = Some(None);
            }
        }
        EventDisposition::Applied
    }

    /// Waits for the next task result and applies it.
    pub async fn process_next(&mut self) -> EventDisposition {
        // The controller owns a sender, so the channel never closes.
        match self.events_rx.recv().await {
            Some(event) => self.apply(event),
            None => EventDisposition::Discarded,
        }
    }

    /// Processes task results until the page leaves `Loading`.
    ///
    /// No timeout is applied; a fetch that never completes keeps this
    /// pending. Wrap in `tokio::time::timeout` to bound the wait.
    pub async fn settle(&mut self) -> PagePhase {
        while self.phase() == PagePhase::Loading {
            self.process_next().await;
        }
        self.phase()
    }

    /// Renders the page for its current phase.
    pub fn view<C, F>(&self, cart: &C, favorites: &F) -> PageView
    where
        C: Cart + ?Sized,
        F: Favorites + ?Sized,
    {
        let related = || self.featured().map(|p| RelatedProducts::new(p.to_vec()));

        match self.phase() {
            PagePhase::Idle => PageView::Idle,
            PagePhase::Loading => PageView::Loading,
            PagePhase::Errored => {
                let err = self.error();
                PageView::Errored {
                    breadcrumb: UNKNOWN_PRODUCT_NAME.to_owned(),
                    code: err.map_or("internal_error", ResolveError::code),
                    message: err.map_or("Something went wrong", ResolveError::user_message),
                    description: ERROR_DESCRIPTION,
                    related: related(),
                }
            }
            PagePhase::Ready => match self.detail() {
                Some(vm) => PageView::Ready {
                    breadcrumb: vm.details().name.clone(),
                    detail: Box::new(ProductDetailView::render(
                        vm,
                        cart,
                        favorites,
                        &self.settings.asset_prefix,
                    )),
                    related: related(),
                },
                None => PageView::Loading,
            },
        }
    }
}
