use std::io::Write;

use anyhow::Result;
use serde_json::json;

use crate::browser::Theme;
use crate::paginate::PageMeta;
use crate::types::Item;

/// Capability set a host must provide to display the catalog.
/// The core calls it after every recomputation.
pub trait Presenter {
    fn render_page(&mut self, items: &[Item], meta: &PageMeta) -> Result<()>;
    /// No items to show; page controls should be hidden.
    fn show_empty_state(&mut self, message: &str) -> Result<()>;
    fn open_detail(&mut self, item: &Item) -> Result<()>;
    fn close_detail(&mut self) -> Result<()>;
    fn apply_theme(&mut self, _theme: Theme) -> Result<()> { Ok(()) }
}

/// Plain text cards for a terminal.
pub struct TerminalPresenter<W: Write> {
    out: W,
    theme: Theme,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self { Self { out, theme: Theme::default() } }

    pub fn into_inner(self) -> W { self.out }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_page(&mut self, items: &[Item], meta: &PageMeta) -> Result<()> {
        writeln!(self.out, "{}  {}", self.theme.icon(), meta.label())?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.out)?;
            writeln!(self.out, "[{}] {} ({}) {}", i + 1, item.title, item.year, item.kind.label())?;
            if !item.description.is_empty() {
                writeln!(self.out, "    {}", item.description)?;
            }
            if !item.tags.is_empty() {
                writeln!(self.out, "    tags: {}", item.tags.join(", "))?;
            }
            writeln!(self.out, "    link: {}", item.link)?;
        }
        let prev = if meta.has_previous { "< prev" } else { "  ----" };
        let next = if meta.has_next { "next >" } else { "----  " };
        writeln!(self.out)?;
        writeln!(self.out, "{prev}  |  {next}")?;
        tracing::trace!(page = meta.page, shown = items.len(), "rendered page");
        self.out.flush()?;
        Ok(())
    }

    fn show_empty_state(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()?;
        Ok(())
    }

    fn open_detail(&mut self, item: &Item) -> Result<()> {
        writeln!(self.out, "+-- {}", item.title)?;
        writeln!(self.out, "| Year: {}", item.year)?;
        writeln!(self.out, "| Type: {}", item.kind.label())?;
        writeln!(self.out, "| Image: {}", item.image)?;
        if !item.description.is_empty() {
            writeln!(self.out, "| {}", item.description)?;
        }
        writeln!(self.out, "| More: {}", item.link)?;
        writeln!(self.out, "+--")?;
        self.out.flush()?;
        Ok(())
    }

    fn close_detail(&mut self) -> Result<()> {
        writeln!(self.out, "(detail closed)")?;
        self.out.flush()?;
        Ok(())
    }

    fn apply_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        writeln!(self.out, "theme: {:?} {}", theme, theme.icon())?;
        self.out.flush()?;
        Ok(())
    }
}

/// One JSON document per call, for scripting.
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self { Self { out } }

    pub fn into_inner(self) -> W { self.out }

    fn emit(&mut self, value: serde_json::Value) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn render_page(&mut self, items: &[Item], meta: &PageMeta) -> Result<()> {
        self.emit(json!({ "meta": meta, "items": items }))
    }

    fn show_empty_state(&mut self, message: &str) -> Result<()> {
        self.emit(json!({ "empty": message }))
    }

    fn open_detail(&mut self, item: &Item) -> Result<()> {
        self.emit(json!({ "detail": item }))
    }

    fn close_detail(&mut self) -> Result<()> {
        self.emit(json!({ "detail": null }))
    }
}
