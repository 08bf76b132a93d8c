pub mod browser;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod mapping;
pub mod paginate;
pub mod presenter;
pub mod source;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::browser::{Browser, LoadOutcome, LoadTicket, Theme};
    pub use crate::config::Config;
    pub use crate::error::{LoadError, LOAD_ERROR_MESSAGE};
    pub use crate::filter::filter;
    pub use crate::loader::CatalogLoader;
    pub use crate::mapping::normalize;
    pub use crate::paginate::{paginate, Page, PageMeta, Pagination, ITEMS_PER_PAGE};
    pub use crate::presenter::{JsonPresenter, Presenter, TerminalPresenter};
    pub use crate::source::{CatalogSource, FileSource, HttpSource, MemorySource};
    pub use crate::types::{Item, ItemKind, RawRecord};
    pub use crate::{LoadStatus, Vitrine};
}

use anyhow::Result;
use tracing::error;

use crate::browser::{Browser, LoadOutcome, Theme};
use crate::config::Config;
use crate::error::{LoadError, LoadResult};
use crate::loader::CatalogLoader;
use crate::paginate::Pagination;
use crate::presenter::Presenter;
use crate::source::source_for_location;

/// Shown when a search leaves nothing to display.
pub const NO_RESULTS_MESSAGE: &str = "No items match your search.";

/// What a load trigger ended up doing.
#[derive(Debug)]
pub enum LoadStatus {
    Loaded(usize),
    /// Catalog was already populated; no fetch.
    AlreadyLoaded,
    /// A newer request superseded this one.
    Stale,
    /// The user has been shown `LOAD_ERROR_MESSAGE`; state is unchanged.
    Failed(LoadError),
}

/// Session entry point. Owns the loader and the browser state and turns user
/// triggers into presenter calls.
pub struct Vitrine {
    loader: CatalogLoader,
    browser: Browser,
}

impl Vitrine {
    pub fn new(loader: CatalogLoader, page_size: usize) -> Self {
        Self { loader, browser: Browser::new(page_size) }
    }

    pub fn from_config(config: &Config) -> LoadResult<Self> {
        let source = source_for_location(&config.source, &config.user_agent)?;
        let loader = CatalogLoader::new(source).with_timeout(config.fetch_timeout());
        Ok(Self::new(loader, config.page_size))
    }

    pub fn browser(&self) -> &Browser { &self.browser }

    /// Draw the current page, or the empty state when nothing matches.
    pub fn render<P: Presenter + ?Sized>(&self, presenter: &mut P) -> Result<()> {
        match self.browser.view() {
            Pagination::Empty => presenter.show_empty_state(NO_RESULTS_MESSAGE),
            Pagination::Page(page) => presenter.render_page(page.items, &page.meta),
        }
    }

    /// Load if nothing is loaded yet and filter by `term`, without drawing.
    /// A stale result leaves the current view alone.
    pub async fn load_and_filter(&mut self, term: &str) -> LoadResult<LoadStatus> {
        let status = match self.browser.ensure_loaded(&self.loader).await? {
            None => LoadStatus::AlreadyLoaded,
            Some(outcome) => outcome.into(),
        };
        if !matches!(status, LoadStatus::Stale) {
            self.browser.apply_term(term);
        }
        Ok(status)
    }

    /// The load/search button: fetch if nothing is loaded yet, then filter
    /// by `term` and render.
    pub async fn load_and_search<P: Presenter + ?Sized>(&mut self, term: &str, presenter: &mut P) -> Result<LoadStatus> {
        match self.load_and_filter(term).await {
            Ok(LoadStatus::Stale) => Ok(LoadStatus::Stale),
            Ok(status) => {
                self.render(presenter)?;
                Ok(status)
            }
            Err(e) => self.fail(e, presenter),
        }
    }

    /// Fetch again even if a catalog is present; the current term is re-applied.
    pub async fn reload<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<LoadStatus> {
        let status: LoadStatus = match self.browser.load(&self.loader).await {
            Ok(outcome) => outcome.into(),
            Err(e) => return self.fail(e, presenter),
        };
        if let LoadStatus::Loaded(_) = status {
            let term = self.browser.term().to_string();
            self.browser.apply_term(&term);
            self.render(presenter)?;
        }
        Ok(status)
    }

    /// Log a failed load with its cause and show the generic message.
    pub fn report_failure<P: Presenter + ?Sized>(&self, e: &LoadError, presenter: &mut P) -> Result<()> {
        error!(error = %e, location = %self.loader.source().describe(), "catalog load failed");
        presenter.show_empty_state(e.user_message())
    }

    fn fail<P: Presenter + ?Sized>(&self, e: LoadError, presenter: &mut P) -> Result<LoadStatus> {
        self.report_failure(&e, presenter)?;
        Ok(LoadStatus::Failed(e))
    }

    /// Live text input. Ignored until a catalog is loaded.
    pub fn search_input<P: Presenter + ?Sized>(&mut self, term: &str, presenter: &mut P) -> Result<bool> {
        if !self.browser.is_loaded() {
            return Ok(false);
        }
        self.browser.apply_term(term);
        self.render(presenter)?;
        Ok(true)
    }

    pub fn previous<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<bool> {
        let moved = self.browser.previous_page();
        if moved {
            self.render(presenter)?;
        }
        Ok(moved)
    }

    pub fn next<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<bool> {
        let moved = self.browser.next_page();
        if moved {
            self.render(presenter)?;
        }
        Ok(moved)
    }

    /// Jump to a page (clamped) and render it.
    pub fn go_to<P: Presenter + ?Sized>(&mut self, page: usize, presenter: &mut P) -> Result<usize> {
        let landed = self.browser.go_to_page(page);
        self.render(presenter)?;
        Ok(landed)
    }

    /// Open the detail of the item at `position` (0-based) in the filtered
    /// view, moving to its page first.
    pub fn open_position<P: Presenter + ?Sized>(&mut self, position: usize, presenter: &mut P) -> Result<bool> {
        if position >= self.browser.filtered().len() {
            return Ok(false);
        }
        let size = self.browser.page_size();
        self.browser.go_to_page(position / size + 1);
        self.open(position % size, presenter)
    }

    /// Open the detail overlay for the `index`-th (0-based) card on the page.
    pub fn open<P: Presenter + ?Sized>(&mut self, index: usize, presenter: &mut P) -> Result<bool> {
        match self.browser.open_detail(index) {
            Some(item) => {
                presenter.open_detail(item)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn close<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<bool> {
        let was_open = self.browser.close_detail();
        if was_open {
            presenter.close_detail()?;
        }
        Ok(was_open)
    }

    pub fn toggle_theme<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<Theme> {
        let theme = self.browser.toggle_theme();
        presenter.apply_theme(theme)?;
        Ok(theme)
    }
}

impl From<LoadOutcome> for LoadStatus {
    fn from(o: LoadOutcome) -> Self {
        match o {
            LoadOutcome::Applied(n) => LoadStatus::Loaded(n),
            LoadOutcome::Stale => LoadStatus::Stale,
        }
    }
}
