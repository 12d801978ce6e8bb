use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::data::filter::PredicateSet;
use crate::data::model::{NumericField, RoomCount, ValueRange, WorkingSet};
use crate::view::{render, RenderOptions, ViewModel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The categorical filters shown in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Type,
    Beds,
    Baths,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Cleaned dataset, loaded once at startup.
    pub working_set: WorkingSet,

    /// Current sidebar selections.
    pub predicates: PredicateSet,

    pub options: RenderOptions,

    /// Output of the last pipeline run.
    pub view: ViewModel,

    /// Colour per listing type, fixed for the session.
    pub color_map: ColorMap,
}

impl AppState {
    /// Start with every filter fully open.
    pub fn new(working_set: WorkingSet, options: RenderOptions) -> Self {
        let predicates = PredicateSet::full(&working_set);
        let view = render(&working_set, &predicates, &options);
        let color_map = ColorMap::new(&working_set.options().types);
        Self {
            working_set,
            predicates,
            options,
            view,
            color_map,
        }
    }

    /// Re-run the pipeline after a filter or option change.
    pub fn refresh(&mut self) {
        self.view = render(&self.working_set, &self.predicates, &self.options);
    }

    pub fn reset_filters(&mut self) {
        self.predicates = PredicateSet::full(&self.working_set);
        self.refresh();
    }

    pub fn toggle_type(&mut self, kind: &str) {
        if !self.predicates.types.remove(kind) {
            self.predicates.types.insert(kind.to_string());
        }
        self.refresh();
    }

    pub fn toggle_room_count(&mut self, category: Category, value: RoomCount) {
        let selected = match category {
            Category::Beds => &mut self.predicates.beds,
            Category::Baths => &mut self.predicates.baths,
            Category::Type => return,
        };
        if !selected.remove(&value) {
            selected.insert(value);
        }
        self.refresh();
    }

    pub fn toggle_unknown_baths(&mut self) {
        self.predicates.include_unknown_baths = !self.predicates.include_unknown_baths;
        self.refresh();
    }

    /// Select all values in a category.
    pub fn select_all(&mut self, category: Category) {
        let opts = self.working_set.options();
        match category {
            Category::Type => self.predicates.types = opts.types.clone(),
            Category::Beds => self.predicates.beds = opts.beds.clone(),
            Category::Baths => {
                self.predicates.baths = opts.baths.clone();
                self.predicates.include_unknown_baths = true;
            }
        }
        self.refresh();
    }

    /// Deselect all values in a category.
    pub fn select_none(&mut self, category: Category) {
        match category {
            Category::Type => self.predicates.types = BTreeSet::new(),
            Category::Beds => self.predicates.beds = BTreeSet::new(),
            Category::Baths => {
                self.predicates.baths = BTreeSet::new();
                self.predicates.include_unknown_baths = false;
            }
        }
        self.refresh();
    }

    /// Narrow the price range, keeping `min <= max`.
    pub fn set_price_range(&mut self, range: ValueRange) {
        self.predicates.price = ordered(range);
        self.refresh();
    }

    /// Narrow the sqft range, keeping `min <= max`.
    pub fn set_sqft_range(&mut self, range: ValueRange) {
        self.predicates.sqft = ordered(range);
        self.refresh();
    }

    pub fn set_scatter_x(&mut self, field: NumericField) {
        self.options.scatter_x = field;
        self.refresh();
    }
}

fn ordered(range: ValueRange) -> ValueRange {
    if range.min <= range.max {
        range
    } else {
        ValueRange::new(range.max, range.min)
    }
}
