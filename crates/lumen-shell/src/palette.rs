//! The command palette overlay: a filterable, categorized, recency-aware
//! view over the registry's command set.
//!
//! Keyboard navigation runs over a single global index assigned across
//! all category groups in render order; category headers are not part of
//! that index space.

use crate::matcher::highlight_match;
use crate::registry::CommandRegistry;

/// One rendered palette row.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteRow {
    /// Non-interactive category header (capitalized label).
    Category(String),
    /// An interactive command item.
    Item(PaletteItem),
    /// The "No commands found" placeholder.
    Empty,
}

/// Render data for one interactive palette item.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteItem {
    /// Global navigation index across all groups.
    pub index: usize,
    /// The command's literal text (what selection dispatches).
    pub name: String,
    /// Name with query matches wrapped in `<mark>` markup.
    pub markup: String,
    pub description: String,
    /// Among the last 5 recent-ring entries.
    pub recent: bool,
    /// The currently active (keyboard-selected) row.
    pub active: bool,
}

/// Palette view state. Closed initially; recomputed on every query change
/// or navigation key, never persisted.
#[derive(Debug, Default)]
pub struct Palette {
    open: bool,
    query: String,
    items: Vec<String>,
    active: usize,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Total interactive items (category headers excluded).
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// Open with an empty query and the full, unfiltered command list.
    pub fn open(&mut self, registry: &CommandRegistry) {
        self.open = true;
        self.query.clear();
        self.items = registry.all_commands();
        self.active = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Update the query, recompute the filtered list, reset the active
    /// index to 0.
    pub fn set_query(&mut self, registry: &CommandRegistry, query: &str) {
        self.query = query.trim().to_string();
        self.items = registry.filter(&self.query);
        self.active = 0;
    }

    /// Move the active index down, wrapping modulo the item count.
    pub fn move_down(&mut self) {
        let total = self.items.len();
        if total > 0 {
            self.active = (self.active + 1) % total;
        }
    }

    /// Move the active index up, wrapping modulo the item count.
    pub fn move_up(&mut self) {
        let total = self.items.len();
        if total > 0 {
            self.active = (self.active + total - 1) % total;
        }
    }

    /// Item names grouped by category (lexicographic category order,
    /// filter order within each group) -- the global index space.
    fn grouped(&self, registry: &CommandRegistry) -> Vec<(String, Vec<String>)> {
        let mut groups: std::collections::BTreeMap<String, Vec<String>> =
            std::collections::BTreeMap::new();
        for item in &self.items {
            groups
                .entry(registry.category_of(item))
                .or_default()
                .push(item.clone());
        }
        groups.into_iter().collect()
    }

    /// The command the active index points at, in grouped render order.
    pub fn selected(&self, registry: &CommandRegistry) -> Option<String> {
        self.grouped(registry)
            .into_iter()
            .flat_map(|(_, names)| names)
            .nth(self.active)
    }

    /// Render rows for the current state. `recent` is the last-5
    /// most-recent-first slice of the recent-commands ring.
    pub fn rows(&self, registry: &CommandRegistry, recent: &[String]) -> Vec<PaletteRow> {
        if self.items.is_empty() {
            return vec![PaletteRow::Empty];
        }
        let mut rows = Vec::new();
        let mut index = 0;
        for (category, names) in self.grouped(registry) {
            rows.push(PaletteRow::Category(capitalize(&category)));
            for name in names {
                rows.push(PaletteRow::Item(PaletteItem {
                    index,
                    markup: highlight_match(&name, &self.query),
                    description: registry.description_of(&name),
                    recent: recent.contains(&name),
                    active: index == self.active,
                    name,
                }));
                index += 1;
            }
        }
        rows
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
