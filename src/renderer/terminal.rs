use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use tracing::warn;

use super::{FilterTag, ListingState, ProductRow, Renderer, StockTier};
use crate::domain::{Category, ProductFields};
use crate::view_state::{ModalMode, PaginationSummary};

/// Prints the product page as plain text tables.
pub struct TerminalRenderer<W: Write + Send = io::Stdout> {
    out: W,
    color: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl AsRef<str>) {
        if let Err(e) = writeln!(self.out, "{}", text.as_ref()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }

    fn paint(&self, text: &str, tier: StockTier) -> String {
        if !self.color {
            return text.to_string();
        }
        let colored: ColoredString = match tier {
            StockTier::Healthy => text.green(),
            StockTier::Low => text.yellow(),
            StockTier::OutOfStock => text.red(),
        };
        colored.to_string()
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn show_state(&mut self, state: ListingState) {
        match state {
            ListingState::Loading => {}
            ListingState::Populated { filtered: false } => {}
            ListingState::Populated { filtered: true } => self.line("Filtered view"),
            ListingState::Empty => self.line("No products found."),
            ListingState::Error => {
                self.line("Failed to load products. Use `retry` to try again.")
            }
        }
    }

    fn render_products(&mut self, rows: &[ProductRow]) {
        let header = format!(
            "{:>5}  {:<32}  {:<14}  {:<20}  {:>10}  {:<14}  {:>6}",
            "ID", "TITLE", "SKU", "CATEGORY", "PRICE", "STOCK", "RATING"
        );
        let header = self.heading(&header);
        self.line(header);
        for row in rows {
            // Pad before painting so escape codes don't skew the columns.
            let stock = self.paint(&format!("{:<14}", row.stock), row.stock_tier);
            let line = format!(
                "{:>5}  {:<32}  {:<14}  {:<20}  {:>10}  {}  {:>6}",
                row.id,
                truncate(&row.title, 32),
                truncate(&row.sku, 14),
                truncate(&row.category, 20),
                row.price,
                stock,
                row.rating
            );
            self.line(line);
        }
    }

    fn set_pagination(&mut self, summary: &PaginationSummary) {
        let mut text = format!(
            "Showing {} to {} of {} products",
            summary.start, summary.end, summary.total
        );
        if summary.previous_enabled {
            text.push_str("  [prev]");
        }
        if summary.next_enabled {
            text.push_str("  [next]");
        }
        self.line(text);
    }

    fn set_active_filters(&mut self, tags: &[FilterTag]) {
        if tags.is_empty() {
            return;
        }
        let tags: Vec<String> = tags
            .iter()
            .map(|tag| format!("{}: {}", tag.label, tag.value))
            .collect();
        self.line(format!("Active filters: {}", tags.join(" | ")));
    }

    fn set_categories(&mut self, categories: &[Category]) {
        let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
        self.line(format!("Categories: {}", slugs.join(", ")));
    }

    fn show_modal(&mut self, mode: ModalMode, form: &ProductFields) {
        let title = self.heading(&mode.to_string());
        self.line(title);
        let value = serde_json::to_value(form).unwrap_or_default();
        for name in ProductFields::NAMES {
            let current = match value.get(name) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            self.line(format!("  {:<12} {}", name, current));
        }
        self.line("Submit with `save key=value ...` or `cancel`.");
    }

    fn hide_modal(&mut self) {}

    fn notify(&mut self, message: &str) {
        self.line(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;
    use crate::renderer::product_rows;

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn prints_rows_and_summary() {
        let mut renderer = TerminalRenderer::new(Vec::new(), false);
        let products = vec![Product::new(1, "Essence Mascara Lash Princess", 9.99, 5)];
        renderer.render_products(&product_rows(&products));
        renderer.set_pagination(&PaginationSummary {
            start: 1,
            end: 10,
            total: 194,
            previous_enabled: false,
            next_enabled: true,
        });

        let text = output(renderer);
        assert!(text.contains("Essence Mascara Lash Princess"));
        assert!(text.contains("$9.99"));
        assert!(text.contains("5 in stock"));
        assert!(text.contains("Showing 1 to 10 of 194 products  [next]"));
        assert!(!text.contains("[prev]"));
    }

    #[test]
    fn modal_lists_prefilled_fields() {
        let mut renderer = TerminalRenderer::new(Vec::new(), false);
        let fields = ProductFields::from_pairs(["title=Lamp", "price=12.5"]).unwrap();
        renderer.show_modal(ModalMode::Edit, &fields);

        let text = output(renderer);
        assert!(text.starts_with("Edit Product"));
        assert!(text.contains("title        Lamp"));
        assert!(text.contains("price        12.5"));
    }

    #[test]
    fn long_titles_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
