//! The title catalog: every scanned title, its flags, and processing order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;
use crate::title::Title;

/// Which flags a title must carry to match. No flags matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchFlags {
    pub selected: bool,
    pub visible: bool,
}

impl MatchFlags {
    pub const ALL: Self = Self {
        selected: false,
        visible: false,
    };
    pub const SELECTED: Self = Self {
        selected: true,
        visible: false,
    };
    pub const VISIBLE: Self = Self {
        selected: false,
        visible: true,
    };
    pub const SELECTED_VISIBLE: Self = Self {
        selected: true,
        visible: true,
    };

    fn matches(&self, title: &Title) -> bool {
        (!self.selected || title.selected) && (!self.visible || title.visible)
    }
}

/// Titles matching a flag query, plus fallbacks computed over the whole
/// catalog for when nothing matches.
#[derive(Debug, Clone)]
pub struct MatchingTitles<'a> {
    pub titles: Vec<&'a Title>,
    /// First title in catalog order.
    pub default_title: Option<&'a Title>,
    /// Longest title; the earliest wins a tie.
    pub longest_title: Option<&'a Title>,
}

impl<'a> MatchingTitles<'a> {
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// First matching title, else the default title.
    pub fn first_or_default(&self) -> Option<&'a Title> {
        self.titles.first().copied().or(self.default_title)
    }
}

/// Visibility threshold taken from preferences and the disc.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisibilityRule {
    pub minimum_title_seconds: f64,
    pub hide_short_titles: bool,
}

impl VisibilityRule {
    pub fn is_visible(&self, title: &Title) -> bool {
        !self.hide_short_titles || title.duration_secs >= self.minimum_title_seconds
    }
}

/// Owns every title of the current disc.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleCatalog {
    titles: Vec<Title>,
    #[serde(skip)]
    visibility: VisibilityRule,
}

impl TitleCatalog {
    /// Build a catalog in probe order, numbering `order_number` from 1.
    pub fn from_titles(titles: Vec<Title>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for title in &titles {
            if !seen.insert(title.title_number) {
                return Err(CatalogError::DuplicateTitle {
                    title_number: title.title_number,
                });
            }
        }
        let mut catalog = Self {
            titles,
            visibility: VisibilityRule::default(),
        };
        catalog.set_natural_title_order();
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn get(&self, title_number: u32) -> Option<&Title> {
        self.titles.iter().find(|t| t.title_number == title_number)
    }

    pub fn get_mut(&mut self, title_number: u32) -> Option<&mut Title> {
        self.titles.iter_mut().find(|t| t.title_number == title_number)
    }

    /// Probe order.
    pub fn iter(&self) -> impl Iterator<Item = &Title> {
        self.titles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Title> {
        self.titles.iter_mut()
    }

    /// Processing order: by `order_number`, ties broken by `title_number`.
    pub fn titles_in_order(&self) -> Vec<&Title> {
        let mut ordered: Vec<&Title> = self.titles.iter().collect();
        ordered.sort_by_key(|t| (t.order_number, t.title_number));
        ordered
    }

    pub fn matching_titles(&self, flags: MatchFlags) -> MatchingTitles<'_> {
        let ordered = self.titles_in_order();
        let longest_title = ordered.iter().copied().fold(None, |best: Option<&Title>, t| match best {
            Some(b) if b.duration_secs >= t.duration_secs => Some(b),
            _ => Some(t),
        });
        MatchingTitles {
            default_title: ordered.first().copied(),
            longest_title,
            titles: ordered.into_iter().filter(|t| flags.matches(t)).collect(),
        }
    }

    pub fn move_up(&mut self, title_number: u32) -> Result<(), CatalogError> {
        self.reorder(title_number, |order, index| {
            if index > 0 {
                order.swap(index, index - 1);
            }
        })
    }

    pub fn move_down(&mut self, title_number: u32) -> Result<(), CatalogError> {
        self.reorder(title_number, |order, index| {
            if index + 1 < order.len() {
                order.swap(index, index + 1);
            }
        })
    }

    pub fn move_top(&mut self, title_number: u32) -> Result<(), CatalogError> {
        self.reorder(title_number, |order, index| {
            let moved = order.remove(index);
            order.insert(0, moved);
        })
    }

    pub fn move_bottom(&mut self, title_number: u32) -> Result<(), CatalogError> {
        self.reorder(title_number, |order, index| {
            let moved = order.remove(index);
            order.push(moved);
        })
    }

    /// Reset processing order to probe-reported title order.
    pub fn set_natural_title_order(&mut self) {
        let probe_order: Vec<u32> = self.titles.iter().map(|t| t.title_number).collect();
        self.renumber(probe_order);
    }

    fn reorder(
        &mut self,
        title_number: u32,
        apply: impl FnOnce(&mut Vec<u32>, usize),
    ) -> Result<(), CatalogError> {
        let mut order: Vec<u32> = self
            .titles_in_order()
            .into_iter()
            .map(|t| t.title_number)
            .collect();
        let index = order
            .iter()
            .position(|&n| n == title_number)
            .ok_or(CatalogError::UnknownTitle { title_number })?;
        apply(&mut order, index);
        self.renumber(order);
        Ok(())
    }

    /// Assign `order_number` 1..=n following the given title numbers.
    fn renumber(&mut self, order: Vec<u32>) {
        for (position, number) in (1..).zip(order) {
            if let Some(title) = self.get_mut(number) {
                title.order_number = position;
            }
        }
    }

    /// Replace the visibility rule and recompute every title's flag.
    pub fn set_visibility_rule(&mut self, rule: VisibilityRule) {
        self.visibility = rule;
        self.refresh_visible();
    }

    pub fn visibility_rule(&self) -> VisibilityRule {
        self.visibility
    }

    /// Recompute `visible` for every title. Selection is untouched.
    pub fn refresh_visible(&mut self) {
        let rule = self.visibility;
        for title in &mut self.titles {
            title.visible = rule.is_visible(title);
        }
        debug!(
            visible = self.titles.iter().filter(|t| t.visible).count(),
            total = self.titles.len(),
            "Refreshed title visibility"
        );
    }

    pub fn clear_selections(&mut self) {
        for title in &mut self.titles {
            title.selected = false;
        }
    }

    /// Select the longest title. Returns its title number.
    pub fn select_longest(&mut self) -> Option<u32> {
        let number = self
            .matching_titles(MatchFlags::ALL)
            .longest_title
            .map(|t| t.title_number)?;
        if let Some(title) = self.get_mut(number) {
            title.selected = true;
        }
        Some(number)
    }
}
