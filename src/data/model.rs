use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// RoomCount – a bed or bath count
// ---------------------------------------------------------------------------

/// A bed/bath count as read from the CSV (pandas keeps these as floats, so
/// half-baths such as `2.5` occur).
/// Used as a key in `BTreeSet` / `BTreeMap` downstream, so it must be `Ord`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomCount(pub f64);

// -- Manual Eq/Ord so we can put RoomCount in BTreeSet --

impl Eq for RoomCount {}

impl PartialOrd for RoomCount {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RoomCount {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for RoomCount {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for RoomCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl RoomCount {
    pub fn value(self) -> f64 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the cleaned dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub long: f64,
}

/// A single listing after load-time cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Property type (`single_family`, `condos`, ...). Never `land` or `farm`.
    pub kind: String,
    pub beds: RoomCount,
    pub baths: Option<RoomCount>,
    pub sqft: f64,
    pub list_price: f64,
    /// Only present when the dataset carries `lat` / `long` columns.
    pub location: Option<GeoPoint>,
}

impl Listing {
    /// `list_price / sqft`, or `None` when the listing has no usable floor
    /// area (`sqft <= 0`) or the quotient is not finite.
    pub fn price_per_sqft(&self) -> Option<f64> {
        if self.sqft <= 0.0 {
            return None;
        }
        let ppsf = self.list_price / self.sqft;
        ppsf.is_finite().then_some(ppsf)
    }
}

// ---------------------------------------------------------------------------
// Numeric fields – the columns statistics can be computed over
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericField {
    ListPrice,
    Beds,
    Baths,
    Sqft,
}

impl NumericField {
    /// Fields in the order they appear in the correlation matrix.
    pub const ALL: [NumericField; 4] = [
        NumericField::ListPrice,
        NumericField::Beds,
        NumericField::Baths,
        NumericField::Sqft,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NumericField::ListPrice => "Price",
            NumericField::Beds => "Bedrooms",
            NumericField::Baths => "Bathrooms",
            NumericField::Sqft => "Square Feet",
        }
    }

    pub fn value(self, listing: &Listing) -> Option<f64> {
        match self {
            NumericField::ListPrice => Some(listing.list_price),
            NumericField::Beds => Some(listing.beds.value()),
            NumericField::Baths => listing.baths.map(RoomCount::value),
            NumericField::Sqft => Some(listing.sqft),
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ValueRange – inclusive numeric interval
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        ValueRange { min, max }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Smallest range covering every value, or `None` for an empty input.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(ValueRange::new(v, v)),
            Some(r) => Some(ValueRange::new(r.min.min(v), r.max.max(v))),
        })
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

// ---------------------------------------------------------------------------
// WorkingSet – the cleaned, immutable dataset
// ---------------------------------------------------------------------------

/// Distinct values and observed ranges the sidebar offers as filter options.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub types: BTreeSet<String>,
    pub beds: BTreeSet<RoomCount>,
    /// Non-null bath counts only.
    pub baths: BTreeSet<RoomCount>,
    /// Whether any listing has a null bath count.
    pub has_unknown_baths: bool,
    pub price: ValueRange,
    pub sqft: ValueRange,
}

/// The dataset after load-time cleaning. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct WorkingSet {
    listings: Vec<Listing>,
    options: FilterOptions,
    has_coordinates: bool,
}

impl WorkingSet {
    /// Build the option index from already-cleaned listings.
    pub fn from_listings(listings: Vec<Listing>, has_coordinates: bool) -> Self {
        let mut types = BTreeSet::new();
        let mut beds = BTreeSet::new();
        let mut baths = BTreeSet::new();
        let mut has_unknown_baths = false;

        for listing in &listings {
            types.insert(listing.kind.clone());
            beds.insert(listing.beds);
            match listing.baths {
                Some(b) => {
                    baths.insert(b);
                }
                None => has_unknown_baths = true,
            }
        }

        let empty = ValueRange::new(0.0, 0.0);
        let price = ValueRange::spanning(listings.iter().map(|l| l.list_price)).unwrap_or(empty);
        let sqft = ValueRange::spanning(listings.iter().map(|l| l.sqft)).unwrap_or(empty);

        WorkingSet {
            listings,
            options: FilterOptions {
                types,
                beds,
                baths,
                has_unknown_baths,
                price,
                sqft,
            },
            has_coordinates,
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Whether the source CSV carried both `lat` and `long` columns.
    pub fn has_coordinates(&self) -> bool {
        self.has_coordinates
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
