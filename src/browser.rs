use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LoadResult;
use crate::filter::filter;
use crate::loader::CatalogLoader;
use crate::paginate::{paginate, total_pages, Pagination, ITEMS_PER_PAGE};
use crate::types::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icon of the toggle: it shows the theme you would switch to.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

/// Token handed out per load request. Only the newest one may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Catalog replaced with this many items.
    Applied(usize),
    /// A newer request was issued meanwhile; result dropped.
    Stale,
}

/// Session state: catalog, filtered view, paging, detail selection, theme.
#[derive(Debug, Clone)]
pub struct Browser {
    all_items: Vec<Item>,
    filtered: Vec<Item>,
    term: String,
    page: usize,
    page_size: usize,
    selected: Option<Item>,
    theme: Theme,
    generation: u64,
}

impl Default for Browser {
    fn default() -> Self { Self::new(ITEMS_PER_PAGE) }
}

impl Browser {
    pub fn new(page_size: usize) -> Self {
        Self {
            all_items: Vec::new(),
            filtered: Vec::new(),
            term: String::new(),
            page: 1,
            page_size: page_size.max(1),
            selected: None,
            theme: Theme::default(),
            generation: 0,
        }
    }

    pub fn items(&self) -> &[Item] { &self.all_items }
    pub fn filtered(&self) -> &[Item] { &self.filtered }
    pub fn term(&self) -> &str { &self.term }
    pub fn current_page(&self) -> usize { self.page }
    pub fn page_size(&self) -> usize { self.page_size }
    pub fn theme(&self) -> Theme { self.theme }
    pub fn selected(&self) -> Option<&Item> { self.selected.as_ref() }
    pub fn is_loaded(&self) -> bool { !self.all_items.is_empty() }

    /// 0 when the filtered view is empty.
    pub fn total_pages(&self) -> usize { total_pages(self.filtered.len(), self.page_size) }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Apply a load result. Stale tickets are dropped whatever they carry;
    /// an error leaves the catalog untouched and is handed back.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: LoadResult<Vec<Item>>) -> LoadResult<LoadOutcome> {
        if ticket.0 != self.generation {
            warn!(ticket = ticket.0, current = self.generation, "discarding stale catalog load");
            return Ok(LoadOutcome::Stale);
        }
        let items = result?;
        let count = items.len();
        self.replace_catalog(items);
        Ok(LoadOutcome::Applied(count))
    }

    pub async fn load(&mut self, loader: &CatalogLoader) -> LoadResult<LoadOutcome> {
        let ticket = self.begin_load();
        let result = loader.load().await;
        self.complete_load(ticket, result)
    }

    /// Fetch only when nothing has been loaded yet.
    pub async fn ensure_loaded(&mut self, loader: &CatalogLoader) -> LoadResult<Option<LoadOutcome>> {
        if self.is_loaded() {
            debug!(count = self.all_items.len(), "catalog already loaded, skipping fetch");
            return Ok(None);
        }
        self.load(loader).await.map(Some)
    }

    fn replace_catalog(&mut self, items: Vec<Item>) {
        self.all_items = items;
        self.filtered = self.all_items.clone();
        self.page = 1;
        self.selected = None;
    }

    /// Recompute the filtered view for `term` and go back to page 1.
    pub fn apply_term(&mut self, term: &str) {
        self.term = term.to_string();
        self.filtered = filter(&self.all_items, term);
        self.page = 1;
        debug!(term, matched = self.filtered.len(), total = self.all_items.len(), "filter applied");
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped into the valid range. Returns the page landed on.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.total_pages().max(1));
        self.page
    }

    pub fn view(&self) -> Pagination<'_> { paginate(&self.filtered, self.page, self.page_size) }

    /// Select the `index`-th (0-based) item of the visible page.
    pub fn open_detail(&mut self, index: usize) -> Option<&Item> {
        let item = self.view().page().and_then(|p| p.items.get(index)).cloned()?;
        self.selected = Some(item);
        self.selected.as_ref()
    }

    /// Returns whether a detail was open.
    pub fn close_detail(&mut self) -> bool { self.selected.take().is_some() }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}
