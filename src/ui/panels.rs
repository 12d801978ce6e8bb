use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::model::{RoomCount, ValueRange};
use crate::state::{AppState, Category};
use crate::ui::format;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter");
    ui.separator();

    // Clone what we need so we can mutate state inside the loops.
    let opts = state.working_set.options().clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
            ui.separator();

            // ---- Property type ----
            let header = format!(
                "Type  ({}/{})",
                state.predicates.types.len(),
                opts.types.len()
            );
            category_header(ui, state, Category::Type, header, |ui, state| {
                for kind in &opts.types {
                    let mut checked = state.predicates.types.contains(kind);
                    let text = RichText::new(kind).color(state.color_map.color_for(kind));
                    if ui.checkbox(&mut checked, text).changed() {
                        state.toggle_type(kind);
                    }
                }
            });

            // ---- Bedrooms ----
            let header = format!(
                "Bedroom  ({}/{})",
                state.predicates.beds.len(),
                opts.beds.len()
            );
            category_header(ui, state, Category::Beds, header, |ui, state| {
                for &beds in &opts.beds {
                    room_count_checkbox(ui, state, Category::Beds, beds);
                }
            });

            // ---- Bathrooms ----
            let header = format!(
                "Bathroom  ({}/{})",
                state.predicates.baths.len(),
                opts.baths.len()
            );
            category_header(ui, state, Category::Baths, header, |ui, state| {
                for &baths in &opts.baths {
                    room_count_checkbox(ui, state, Category::Baths, baths);
                }
                if opts.has_unknown_baths {
                    let mut checked = state.predicates.include_unknown_baths;
                    if ui
                        .checkbox(&mut checked, RichText::new("unknown").italics())
                        .changed()
                    {
                        state.toggle_unknown_baths();
                    }
                }
            });

            ui.separator();

            // ---- Ranges ----
            ui.strong("Price range:");
            if let Some(range) = range_sliders(ui, state.predicates.price, opts.price, "$") {
                state.set_price_range(range);
            }
            ui.label(format!(
                "{} – {}",
                format::price(state.predicates.price.min),
                format::price(state.predicates.price.max)
            ));

            ui.add_space(8.0);
            ui.strong("Square feet:");
            if let Some(range) = range_sliders(ui, state.predicates.sqft, opts.sqft, "") {
                state.set_sqft_range(range);
            }
        });
}

/// Collapsible section with All / None buttons above its checkboxes.
fn category_header(
    ui: &mut Ui,
    state: &mut AppState,
    category: Category,
    header: String,
    body: impl FnOnce(&mut Ui, &mut AppState),
) {
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(format!("{category:?}"))
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(category);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(category);
                }
            });
            body(ui, state);
        });
}

fn room_count_checkbox(ui: &mut Ui, state: &mut AppState, category: Category, value: RoomCount) {
    let selected = match category {
        Category::Beds => &state.predicates.beds,
        Category::Baths => &state.predicates.baths,
        Category::Type => return,
    };
    let mut checked = selected.contains(&value);
    if ui.checkbox(&mut checked, value.to_string()).changed() {
        state.toggle_room_count(category, value);
    }
}

/// Min / max sliders bounded by the observed range. Returns the new range
/// when either slider moved.
fn range_sliders(ui: &mut Ui, current: ValueRange, bounds: ValueRange, prefix: &str) -> Option<ValueRange> {
    let mut range = current;
    let min_changed = ui
        .add(
            egui::Slider::new(&mut range.min, bounds.min..=bounds.max)
                .text("min")
                .prefix(prefix),
        )
        .changed();
    let max_changed = ui
        .add(
            egui::Slider::new(&mut range.max, bounds.min..=bounds.max)
                .text("max")
                .prefix(prefix),
        )
        .changed();
    (min_changed || max_changed).then_some(range)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with row counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Texas Housing Market Analysis");
        ui.separator();
        ui.label(format!(
            "{} listings loaded, {} visible",
            format::thousands(state.working_set.len() as u64),
            format::thousands(state.view.summary.count as u64)
        ));
    });
}
