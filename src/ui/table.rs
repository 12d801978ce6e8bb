use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::stats::TopListing;
use crate::ui::format;

const ROW_HEIGHT: f32 = 20.0;

/// The most expensive listings in the current view.
pub fn top_listings(ui: &mut Ui, rows: &[TopListing]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(120.0))
        .columns(Column::auto().at_least(60.0), 3)
        .column(Column::remainder())
        .header(ROW_HEIGHT, |mut header| {
            for title in ["Type", "Beds", "Baths", "Sqft", "Price"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for listing in rows {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(&listing.kind);
                    });
                    row.col(|ui| {
                        ui.label(listing.beds.to_string());
                    });
                    row.col(|ui| {
                        ui.label(
                            listing
                                .baths
                                .map(|b| b.to_string())
                                .unwrap_or_else(|| format::NO_DATA.to_string()),
                        );
                    });
                    row.col(|ui| {
                        ui.label(format::thousands(listing.sqft.round().max(0.0) as u64));
                    });
                    row.col(|ui| {
                        ui.label(format::price(listing.list_price));
                    });
                });
            }
        });
}
