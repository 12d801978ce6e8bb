use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::color::{contrasting_text, correlation_color, price_color, ColorMap};
use crate::data::model::NumericField;
use crate::data::stats::{BedsGroup, CorrelationMatrix, Histogram};
use crate::ui::format;
use crate::view::{MapLayer, ScatterSeries};

const CHART_HEIGHT: f32 = 260.0;
const BAR_COLOR: Color32 = Color32::from_rgb(70, 130, 180);

// ---------------------------------------------------------------------------
// Bar chart: average price by bedroom count
// ---------------------------------------------------------------------------

pub fn price_by_beds(ui: &mut Ui, groups: &[BedsGroup]) {
    let bars: Vec<Bar> = groups
        .iter()
        .map(|g| {
            Bar::new(g.beds.value(), g.mean_price)
                .width(0.6)
                .name(format!("{} beds · {} listings", g.beds, g.count))
        })
        .collect();

    Plot::new("price_by_beds")
        .height(CHART_HEIGHT)
        .x_axis_label("Bedrooms")
        .y_axis_label("Average Price")
        .y_axis_formatter(|mark, _| format::compact_price(mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
        });
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

pub fn histogram(ui: &mut Ui, id: &str, histogram: Option<&Histogram>, x_label: &str) {
    let bars: Vec<Bar> = histogram
        .map(|h| {
            h.bins()
                .map(|bin| {
                    Bar::new((bin.lower + bin.upper) / 2.0, bin.count as f64)
                        .width(h.bin_width)
                        .name(format!(
                            "{} – {}",
                            format::compact_price(bin.lower),
                            format::compact_price(bin.upper)
                        ))
                })
                .collect()
        })
        .unwrap_or_default();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Listings")
        .x_axis_formatter(|mark, _| format::compact_price(mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
        });
}

// ---------------------------------------------------------------------------
// Scatter: one numeric field against list price, coloured by type
// ---------------------------------------------------------------------------

pub fn scatter(ui: &mut Ui, x: NumericField, series: &[ScatterSeries], colors: &ColorMap) {
    Plot::new("scatter")
        .height(CHART_HEIGHT + 60.0)
        .legend(Legend::default())
        .x_axis_label(x.label())
        .y_axis_label(NumericField::ListPrice.label())
        .y_axis_formatter(|mark, _| format::compact_price(mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for s in series {
                plot_ui.points(
                    Points::new(s.points.clone())
                        .radius(3.0)
                        .color(colors.color_for(&s.kind))
                        .name(&s.kind),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Map: listings at (long, lat), colour and size scaled by price
// ---------------------------------------------------------------------------

const MIN_RADIUS: f32 = 2.0;
const MAX_RADIUS: f32 = 8.0;

pub fn price_map(ui: &mut Ui, layer: &MapLayer) {
    Plot::new("price_map")
        .height(CHART_HEIGHT * 1.6)
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let Some(range) = layer.price_range else {
                return;
            };
            for p in &layer.points {
                let t = if range.width() > 0.0 {
                    (p.list_price - range.min) / range.width()
                } else {
                    0.5
                };
                plot_ui.points(
                    Points::new(vec![[p.long, p.lat]])
                        .radius(MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * t as f32)
                        .color(price_color(t)),
                );
            }
        });

    if let Some(range) = layer.price_range {
        ui.horizontal(|ui: &mut Ui| {
            ui.colored_label(price_color(0.0), format::price(range.min));
            ui.label("→");
            ui.colored_label(price_color(1.0), format::price(range.max));
        });
    }
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

const CELL: f32 = 72.0;
const LABEL_WIDTH: f32 = 96.0;
const HEADER_HEIGHT: f32 = 24.0;

pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.fields.len() as f32;
    let size = egui::vec2(LABEL_WIDTH + CELL * n, HEADER_HEIGHT + CELL * n);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(13.0);

    for (j, field) in matrix.fields.iter().enumerate() {
        painter.text(
            origin + egui::vec2(LABEL_WIDTH + (j as f32 + 0.5) * CELL, HEADER_HEIGHT / 2.0),
            Align2::CENTER_CENTER,
            field.label(),
            font.clone(),
            text_color,
        );
    }

    for (i, row_field) in matrix.fields.iter().enumerate() {
        let y = HEADER_HEIGHT + i as f32 * CELL;
        painter.text(
            origin + egui::vec2(LABEL_WIDTH - 8.0, y + CELL / 2.0),
            Align2::RIGHT_CENTER,
            row_field.label(),
            font.clone(),
            text_color,
        );

        for (j, value) in matrix.values[i].iter().enumerate() {
            let cell = Rect::from_min_size(
                origin + egui::vec2(LABEL_WIDTH + j as f32 * CELL, y),
                egui::vec2(CELL, CELL),
            )
            .shrink(1.0);
            let (fill, label) = match value {
                Some(r) => (correlation_color(*r), format!("{r:.2}")),
                None => (Color32::DARK_GRAY, format::NO_DATA.to_string()),
            };
            painter.rect_filled(cell, 2.0, fill);
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                label,
                font.clone(),
                contrasting_text(fill),
            );
        }
    }
}
