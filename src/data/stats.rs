use std::collections::BTreeMap;

use super::filter::FilteredView;
use super::model::{Listing, NumericField, RoomCount, ValueRange};

/// Default bin count for the price and price-per-sqft histograms.
pub const DEFAULT_BINS: usize = 50;

// ---------------------------------------------------------------------------
// Headline numbers
// ---------------------------------------------------------------------------

/// Row count plus the two headline means. Means are `None` for an empty view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean_price: Option<f64>,
    /// Rounded to one decimal place.
    pub mean_beds: Option<f64>,
}

pub fn summary(view: &FilteredView<'_>) -> Summary {
    Summary {
        count: view.len(),
        mean_price: mean_price(view),
        mean_beds: mean_beds(view),
    }
}

pub fn mean_price(view: &FilteredView<'_>) -> Option<f64> {
    mean(view.rows().map(|l| l.list_price))
}

/// Rounded from the exact stored value, so ties go to the even digit
/// (`2.25` → `2.2`) and `1.15`, stored just below, becomes `1.1`.
pub fn mean_beds(view: &FilteredView<'_>) -> Option<f64> {
    mean(view.rows().map(|l| l.beds.value())).and_then(|m| format!("{m:.1}").parse().ok())
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

// ---------------------------------------------------------------------------
// Group-by
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BedsGroup {
    pub beds: RoomCount,
    pub mean_price: f64,
    pub count: usize,
}

/// Mean list price per distinct bed count, ascending by bed count.
pub fn mean_price_by_beds(view: &FilteredView<'_>) -> Vec<BedsGroup> {
    let mut groups: BTreeMap<RoomCount, (f64, usize)> = BTreeMap::new();
    for listing in view.rows() {
        let entry = groups.entry(listing.beds).or_insert((0.0, 0));
        entry.0 += listing.list_price;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(beds, (sum, count))| BedsGroup {
            beds,
            mean_price: sum / count as f64,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// A single histogram bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    /// Lower bound (inclusive).
    pub lower: f64,
    /// Upper bound (exclusive, except for the last bin).
    pub upper: f64,
    pub count: usize,
}

/// Equal-width frequency distribution over the observed range of the values.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub range: ValueRange,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Returns `None` for no values or zero bins.
    ///
    /// When every value is identical the bins are one unit wide starting at
    /// that value, and everything lands in the first bin.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }
        let range = ValueRange::spanning(values.iter().copied())?;
        let degenerate = range.width() == 0.0;
        let bin_width = if degenerate {
            1.0
        } else {
            range.width() / bins as f64
        };

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = if degenerate {
                0
            } else {
                (((v - range.min) / bin_width) as usize).min(bins - 1)
            };
            counts[idx] += 1;
        }

        Some(Histogram {
            range,
            bin_width,
            counts,
        })
    }

    pub fn bins(&self) -> impl Iterator<Item = HistogramBin> + '_ {
        self.counts.iter().enumerate().map(|(i, &count)| {
            let lower = self.range.min + i as f64 * self.bin_width;
            HistogramBin {
                lower,
                upper: lower + self.bin_width,
                count,
            }
        })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

pub fn price_histogram(view: &FilteredView<'_>, bins: usize) -> Option<Histogram> {
    let prices: Vec<f64> = view.rows().map(|l| l.list_price).collect();
    Histogram::from_values(&prices, bins)
}

/// Histogram of `list_price / sqft`. Listings whose price per sqft is
/// undefined are left out; see [`undefined_price_per_sqft`].
pub fn price_per_sqft_histogram(view: &FilteredView<'_>, bins: usize) -> Option<Histogram> {
    let values: Vec<f64> = view.rows().filter_map(Listing::price_per_sqft).collect();
    Histogram::from_values(&values, bins)
}

/// Number of listings in the view with no defined price per sqft.
pub fn undefined_price_per_sqft(view: &FilteredView<'_>) -> usize {
    view.rows().filter(|l| l.price_per_sqft().is_none()).count()
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pearson correlation between every pair of [`NumericField::ALL`].
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub fields: [NumericField; 4],
    /// `values[i][j]` correlates `fields[i]` with `fields[j]`; `None` when
    /// undefined (fewer than two complete pairs, or a constant column).
    pub values: [[Option<f64>; 4]; 4],
}

impl CorrelationMatrix {
    pub fn get(&self, a: NumericField, b: NumericField) -> Option<f64> {
        let i = self.fields.iter().position(|&f| f == a)?;
        let j = self.fields.iter().position(|&f| f == b)?;
        self.values[i][j]
    }

    /// True when no pair had enough data.
    pub fn is_empty(&self) -> bool {
        self.values.iter().flatten().all(Option::is_none)
    }
}

/// Pairwise correlation: each pair uses the listings where both fields are
/// present, so a null bath count only affects the pairs involving baths.
pub fn correlation_matrix(view: &FilteredView<'_>) -> CorrelationMatrix {
    let fields = NumericField::ALL;
    let mut values = [[None; 4]; 4];
    for (i, &a) in fields.iter().enumerate() {
        for (j, &b) in fields.iter().enumerate().skip(i) {
            let pairs: Vec<(f64, f64)> = view
                .rows()
                .filter_map(|l| Some((a.value(l)?, b.value(l)?)))
                .collect();
            let r = pearson(&pairs).map(|r| if i == j { 1.0 } else { r });
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix { fields, values }
}

fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

// ---------------------------------------------------------------------------
// Top listings
// ---------------------------------------------------------------------------

/// The columns shown in the top-listings table.
#[derive(Debug, Clone, PartialEq)]
pub struct TopListing {
    pub kind: String,
    pub beds: RoomCount,
    pub baths: Option<RoomCount>,
    pub sqft: f64,
    pub list_price: f64,
}

impl From<&Listing> for TopListing {
    fn from(l: &Listing) -> Self {
        TopListing {
            kind: l.kind.clone(),
            beds: l.beds,
            baths: l.baths,
            sqft: l.sqft,
            list_price: l.list_price,
        }
    }
}

/// The `n` most expensive listings, highest first. Equal prices keep their
/// original row order (the sort is stable).
pub fn top_n(view: &FilteredView<'_>, n: usize) -> Vec<TopListing> {
    let mut rows: Vec<&Listing> = view.rows().collect();
    rows.sort_by(|a, b| b.list_price.total_cmp(&a.list_price));
    rows.into_iter().take(n).map(TopListing::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::tests::sample_set;
    use crate::data::filter::{apply, PredicateSet};
    use crate::data::model::tests::listing;
    use crate::data::model::WorkingSet;

    fn priced(prices: &[f64]) -> WorkingSet {
        WorkingSet::from_listings(
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| listing(&format!("t{i}"), 2.0, Some(1.0), 1000.0, p))
                .collect(),
            false,
        )
    }

    fn empty_view(ws: &WorkingSet) -> FilteredView<'_> {
        let mut p = PredicateSet::full(ws);
        p.types.clear();
        apply(ws, &p)
    }

    #[test]
    fn mean_price_of_two_listings() {
        let ws = priced(&[100_000.0, 200_000.0]);
        let view = apply(&ws, &PredicateSet::full(&ws));
        assert_eq!(mean_price(&view), Some(150_000.0));
    }

    #[test]
    fn empty_view_reports_no_data() {
        let ws = sample_set();
        let view = empty_view(&ws);
        assert_eq!(
            summary(&view),
            Summary {
                count: 0,
                mean_price: None,
                mean_beds: None
            }
        );
        assert!(mean_price_by_beds(&view).is_empty());
        assert_eq!(price_histogram(&view, DEFAULT_BINS), None);
        assert_eq!(price_per_sqft_histogram(&view, DEFAULT_BINS), None);
        assert!(correlation_matrix(&view).is_empty());
        assert!(top_n(&view, 10).is_empty());
    }

    #[test]
    fn mean_beds_is_rounded_to_one_decimal() {
        let ws = WorkingSet::from_listings(
            vec![
                listing("a", 3.0, None, 1.0, 1.0),
                listing("a", 3.0, None, 1.0, 1.0),
                listing("a", 4.0, None, 1.0, 1.0),
            ],
            false,
        );
        let view = apply(&ws, &PredicateSet::full(&ws));
        assert_eq!(mean_beds(&view), Some(3.3));
    }

    fn beds_set(beds: &[f64]) -> WorkingSet {
        WorkingSet::from_listings(
            beds.iter().map(|&b| listing("a", b, None, 1.0, 1.0)).collect(),
            false,
        )
    }

    #[test]
    fn mean_beds_tie_rounds_to_even_digit() {
        let ws = beds_set(&[2.0, 2.0, 2.0, 3.0]);
        let view = apply(&ws, &PredicateSet::full(&ws));
        assert_eq!(mean_beds(&view), Some(2.2));
    }

    #[test]
    fn mean_beds_rounds_the_stored_value() {
        // 23 / 20 = 1.15, stored as 1.1499...
        let mut beds = vec![1.0; 17];
        beds.extend([2.0; 3]);
        let ws = beds_set(&beds);
        let view = apply(&ws, &PredicateSet::full(&ws));
        assert_eq!(mean_beds(&view), Some(1.1));
    }

    #[test]
    fn group_keys_are_exactly_the_beds_in_view() {
        let ws = sample_set();
        let mut p = PredicateSet::full(&ws);
        p.beds.remove(&RoomCount(4.0));
        let view = apply(&ws, &p);
        let groups = mean_price_by_beds(&view);

        let keys: Vec<RoomCount> = groups.iter().map(|g| g.beds).collect();
        assert_eq!(keys, [RoomCount(1.0), RoomCount(2.0), RoomCount(3.0)]);

        let three = groups[2];
        assert_eq!(three.count, 2);
        assert_eq!(three.mean_price, (300_000.0 + 355_000.0) / 2.0);
    }

    #[test]
    fn histogram_spans_observed_range() {
        let values: Vec<f64> = (0..=100).map(|v| v as f64).collect();
        let h = Histogram::from_values(&values, 50).unwrap();
        assert_eq!(h.counts.len(), 50);
        assert_eq!(h.bin_width, 2.0);
        assert_eq!(h.total(), 101);
        // The maximum is folded into the last bin.
        assert_eq!(h.counts[49], 3);
        let last = h.bins().last().unwrap();
        assert_eq!(last.upper, 100.0);
    }

    #[test]
    fn histogram_with_identical_values_uses_first_bin() {
        let h = Histogram::from_values(&[5.0, 5.0, 5.0], 50).unwrap();
        assert_eq!(h.counts[0], 3);
        assert_eq!(h.total(), 3);
        assert_eq!(Histogram::from_values(&[1.0], 0), None);
    }

    #[test]
    fn zero_sqft_is_left_out_of_price_per_sqft() {
        let ws = sample_set();
        let view = apply(&ws, &PredicateSet::full(&ws));
        let h = price_per_sqft_histogram(&view, DEFAULT_BINS).unwrap();
        assert_eq!(h.total(), 5);
        assert_eq!(undefined_price_per_sqft(&view), 1);
        assert!(h.range.max.is_finite());
    }

    #[test]
    fn correlation_of_linear_fields() {
        let ws = WorkingSet::from_listings(
            vec![
                listing("a", 1.0, Some(3.0), 500.0, 100_000.0),
                listing("a", 2.0, Some(2.0), 1000.0, 200_000.0),
                listing("a", 3.0, Some(1.0), 1500.0, 300_000.0),
                listing("a", 4.0, None, 2000.0, 400_000.0),
            ],
            false,
        );
        let view = apply(&ws, &PredicateSet::full(&ws));
        let m = correlation_matrix(&view);
        let close = |v: Option<f64>, expected: f64| (v.unwrap() - expected).abs() < 1e-9;

        assert!(close(m.get(NumericField::ListPrice, NumericField::Sqft), 1.0));
        assert!(close(m.get(NumericField::Beds, NumericField::ListPrice), 1.0));
        assert!(close(m.get(NumericField::Baths, NumericField::Beds), -1.0));
        assert_eq!(m.get(NumericField::Baths, NumericField::Baths), Some(1.0));
        assert_eq!(
            m.get(NumericField::Sqft, NumericField::Baths),
            m.get(NumericField::Baths, NumericField::Sqft)
        );
    }

    #[test]
    fn correlation_with_a_constant_column_is_undefined() {
        let ws = priced(&[100.0, 200.0, 300.0]);
        let view = apply(&ws, &PredicateSet::full(&ws));
        let m = correlation_matrix(&view);
        assert_eq!(m.get(NumericField::ListPrice, NumericField::Beds), None);
        assert_eq!(m.get(NumericField::Beds, NumericField::Beds), None);
        assert_eq!(m.get(NumericField::ListPrice, NumericField::ListPrice), Some(1.0));
    }

    #[test]
    fn top_n_sorts_by_price_and_keeps_ties_in_row_order() {
        let ws = priced(&[300.0, 500.0, 300.0, 100.0, 500.0]);
        let view = apply(&ws, &PredicateSet::full(&ws));
        let top: Vec<String> = top_n(&view, 4).into_iter().map(|t| t.kind).collect();
        assert_eq!(top, ["t1", "t4", "t0", "t2"]);
    }

    #[test]
    fn top_n_returns_at_most_n_rows() {
        let prices: Vec<f64> = (0..25).map(|i| (i * 1000) as f64).collect();
        let ws = priced(&prices);
        let view = apply(&ws, &PredicateSet::full(&ws));
        let top = top_n(&view, 10);
        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].list_price >= w[1].list_price));
        assert_eq!(top[0].list_price, 24_000.0);

        let small = apply(&ws, &{
            let mut p = PredicateSet::full(&ws);
            p.price = ValueRange::new(0.0, 3000.0);
            p
        });
        assert_eq!(top_n(&small, 10).len(), 4);
    }
}
