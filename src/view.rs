use std::collections::BTreeMap;

use crate::config::DashboardConfig;
use crate::data::filter::{self, FilteredView, PredicateSet};
use crate::data::model::{NumericField, ValueRange, WorkingSet};
use crate::data::stats::{self, BedsGroup, CorrelationMatrix, Histogram, Summary, TopListing};

// ---------------------------------------------------------------------------
// View model: everything the main panel draws
// ---------------------------------------------------------------------------

/// Knobs that shape the view model without filtering rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub histogram_bins: usize,
    pub top_n: usize,
    /// X axis of the scatter plot; the Y axis is always the list price.
    pub scatter_x: NumericField,
}

impl RenderOptions {
    pub fn from_config(config: &DashboardConfig) -> Self {
        RenderOptions {
            histogram_bins: config.histogram_bins,
            top_n: config.top_n,
            scatter_x: NumericField::Sqft,
        }
    }
}

/// Points of one listing type in the scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub kind: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub lat: f64,
    pub long: f64,
    pub list_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    pub points: Vec<MapPoint>,
    /// Price range of the plotted points, for the colour and size scales.
    pub price_range: Option<ValueRange>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub summary: Summary,
    pub price_by_beds: Vec<BedsGroup>,
    pub price_histogram: Option<Histogram>,
    pub price_per_sqft_histogram: Option<Histogram>,
    /// Listings in view left out of the price-per-sqft histogram.
    pub undefined_price_per_sqft: usize,
    pub correlation: CorrelationMatrix,
    pub scatter_x: NumericField,
    pub scatter: Vec<ScatterSeries>,
    /// `None` when the dataset has no coordinates at all.
    pub map: Option<MapLayer>,
    pub top_listings: Vec<TopListing>,
}

/// Run the whole pipeline for one predicate set.
///
/// Pure: the same inputs always produce the same view model, and nothing is
/// carried over between calls.
pub fn render(
    working_set: &WorkingSet,
    predicates: &PredicateSet,
    options: &RenderOptions,
) -> ViewModel {
    let view = filter::apply(working_set, predicates);
    log::debug!("{} of {} listings pass the filters", view.len(), working_set.len());

    let undefined_price_per_sqft = stats::undefined_price_per_sqft(&view);
    if undefined_price_per_sqft > 0 {
        log::warn!("{undefined_price_per_sqft} listings in view have no usable sqft");
    }

    ViewModel {
        summary: stats::summary(&view),
        price_by_beds: stats::mean_price_by_beds(&view),
        price_histogram: stats::price_histogram(&view, options.histogram_bins),
        price_per_sqft_histogram: stats::price_per_sqft_histogram(&view, options.histogram_bins),
        undefined_price_per_sqft,
        correlation: stats::correlation_matrix(&view),
        scatter_x: options.scatter_x,
        scatter: scatter_series(&view, options.scatter_x),
        map: working_set.has_coordinates().then(|| map_layer(&view)),
        top_listings: stats::top_n(&view, options.top_n),
    }
}

fn scatter_series(view: &FilteredView<'_>, x: NumericField) -> Vec<ScatterSeries> {
    let mut by_kind: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for listing in view.rows() {
        if let Some(xv) = x.value(listing) {
            by_kind
                .entry(listing.kind.as_str())
                .or_default()
                .push([xv, listing.list_price]);
        }
    }
    by_kind
        .into_iter()
        .map(|(kind, points)| ScatterSeries {
            kind: kind.to_string(),
            points,
        })
        .collect()
}

fn map_layer(view: &FilteredView<'_>) -> MapLayer {
    let points: Vec<MapPoint> = view
        .rows()
        .filter_map(|l| {
            let loc = l.location?;
            Some(MapPoint {
                lat: loc.lat,
                long: loc.long,
                list_price: l.list_price,
            })
        })
        .collect();
    let price_range = ValueRange::spanning(points.iter().map(|p| p.list_price));
    MapLayer {
        points,
        price_range,
    }
}
