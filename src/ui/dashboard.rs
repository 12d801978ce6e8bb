use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::model::NumericField;
use crate::state::AppState;
use crate::ui::{charts, format, table};

/// Fields offered as the scatter plot's X axis.
const SCATTER_AXES: [NumericField; 3] = [NumericField::Sqft, NumericField::Beds, NumericField::Baths];

// ---------------------------------------------------------------------------
// Central panel: metrics, charts and the top-listings table
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if state.working_set.is_empty() {
                ui.label(RichText::new("No listings left after cleaning.").weak());
            }
            metrics(ui, state);

            ui.add_space(12.0);
            ui.heading("Average Price By Number Of Bedroom");
            charts::price_by_beds(ui, &state.view.price_by_beds);

            ui.add_space(12.0);
            ui.heading("Price Distribution");
            charts::histogram(ui, "price_hist", state.view.price_histogram.as_ref(), "Price");

            ui.add_space(12.0);
            ui.heading("Price per Square Foot");
            charts::histogram(
                ui,
                "ppsf_hist",
                state.view.price_per_sqft_histogram.as_ref(),
                "Price / sqft",
            );
            if state.view.undefined_price_per_sqft > 0 {
                ui.label(
                    RichText::new(format!(
                        "{} listings without square footage are not shown.",
                        state.view.undefined_price_per_sqft
                    ))
                    .weak(),
                );
            }

            ui.add_space(12.0);
            ui.horizontal(|ui: &mut Ui| {
                ui.heading("Price vs");
                let current = state.options.scatter_x;
                egui::ComboBox::from_id_salt("scatter_x")
                    .selected_text(current.label())
                    .show_ui(ui, |ui: &mut Ui| {
                        for field in SCATTER_AXES {
                            if ui.selectable_label(current == field, field.label()).clicked() {
                                state.set_scatter_x(field);
                            }
                        }
                    });
            });
            charts::scatter(ui, state.view.scatter_x, &state.view.scatter, &state.color_map);

            ui.add_space(12.0);
            ui.heading("Correlation");
            if state.view.correlation.is_empty() {
                ui.label(RichText::new("Not enough listings to correlate.").weak());
            } else {
                charts::correlation_heatmap(ui, &state.view.correlation);
            }

            if let Some(layer) = &state.view.map {
                ui.add_space(12.0);
                ui.heading("Texas Map - Price");
                charts::price_map(ui, layer);
            } else {
                ui.add_space(12.0);
                ui.label(RichText::new("No lat/long columns in this dataset; map unavailable.").weak());
            }

            ui.add_space(12.0);
            ui.heading(format!("Top {} Listings By Price", state.options.top_n));
            table::top_listings(ui, &state.view.top_listings);
        });
}

fn metrics(ui: &mut Ui, state: &AppState) {
    let summary = state.view.summary;
    ui.heading("Common Statistics");
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Housing", format::thousands(summary.count as u64));
        metric(&mut cols[1], "Average Price", format::optional_price(summary.mean_price));
        metric(
            &mut cols[2],
            "Average Bedrooms",
            summary
                .mean_beds
                .map(|b| format!("{b:.1}"))
                .unwrap_or_else(|| format::NO_DATA.to_string()),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.label(RichText::new(label).weak());
    ui.label(RichText::new(value).size(26.0).strong());
}
