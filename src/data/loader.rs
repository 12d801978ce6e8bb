use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use super::model::{GeoPoint, Listing, RoomCount, WorkingSet};

/// Property types removed before anything else happens.
pub const EXCLUDED_TYPES: [&str; 2] = ["land", "farm"];

/// Cell texts pandas reads as a missing number.
pub const NULL_TOKENS: [&str; 19] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "<NA>",
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "1.#IND", "1.#QNAN",
];

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["type", "beds", "baths", "sqft", "listPrice"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV missing '{0}' column")]
    MissingColumn(&'static str),
    #[error("line {line}: '{column}' is empty")]
    MissingValue { line: u64, column: &'static str },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean the listings CSV at `path`.
pub fn load_file(path: &Path) -> Result<WorkingSet, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let working_set = load_reader(file)?;
    log::info!(
        "Loaded {} listings from {}",
        working_set.len(),
        path.display()
    );
    Ok(working_set)
}

/// Parse CSV from any reader, then apply the two cleaning steps in order:
/// drop `land` / `farm` rows, then drop rows without a bed count.
pub fn load_reader<R: Read>(reader: R) -> Result<WorkingSet, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }
    let has_coordinates =
        headers.iter().any(|h| h == "lat") && headers.iter().any(|h| h == "long");

    let mut raw_rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawListing>().enumerate() {
        // +2: one for the header, one for 1-based line numbers.
        raw_rows.push((row_no as u64 + 2, result?));
    }
    let total = raw_rows.len();

    let typed: Vec<(u64, RawListing)> = raw_rows
        .into_iter()
        .filter(|(_, raw)| !EXCLUDED_TYPES.contains(&raw.kind.as_str()))
        .collect();
    let after_type = typed.len();

    let mut listings = Vec::with_capacity(typed.len());
    for (line, raw) in typed {
        let Some(beds) = present(raw.beds) else {
            continue;
        };
        let sqft = present(raw.sqft).ok_or(LoadError::MissingValue {
            line,
            column: "sqft",
        })?;
        let list_price = present(raw.list_price).ok_or(LoadError::MissingValue {
            line,
            column: "listPrice",
        })?;
        let location = match (present(raw.lat), present(raw.long)) {
            (Some(lat), Some(long)) if has_coordinates => Some(GeoPoint { lat, long }),
            _ => None,
        };

        listings.push(Listing {
            kind: raw.kind,
            beds: RoomCount(beds),
            baths: present(raw.baths).map(RoomCount),
            sqft,
            list_price,
            location,
        });
    }

    log::info!(
        "Cleaning: {} rows read, {} land/farm dropped, {} without beds dropped",
        total,
        total - after_type,
        after_type - listings.len()
    );
    if !has_coordinates {
        log::info!("No lat/long columns; map disabled");
    }

    Ok(WorkingSet::from_listings(listings, has_coordinates))
}

// ---------------------------------------------------------------------------
// CSV record
// ---------------------------------------------------------------------------

/// One CSV row before cleaning. Numeric cells are all optional here; which
/// of them may stay empty is decided after the cleaning steps.
#[derive(Debug, Deserialize)]
struct RawListing {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, deserialize_with = "nullable_number")]
    beds: Option<f64>,
    #[serde(default, deserialize_with = "nullable_number")]
    baths: Option<f64>,
    #[serde(default, deserialize_with = "nullable_number")]
    sqft: Option<f64>,
    #[serde(rename = "listPrice", default, deserialize_with = "nullable_number")]
    list_price: Option<f64>,
    #[serde(default, deserialize_with = "nullable_number")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "nullable_number")]
    long: Option<f64>,
}

/// A number, or `None` for any of [`NULL_TOKENS`]. Other text is an error.
fn nullable_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    let cell = cell.trim();
    if NULL_TOKENS.contains(&cell) {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("'{cell}' is not a number")))
}

/// Spellings of NaN that `f64::from_str` accepts (e.g. `nAn`) still mean null.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn load(csv: &str) -> Result<WorkingSet, LoadError> {
        load_reader(csv.as_bytes())
    }

    #[test]
    fn cleaning_drops_land_and_rows_without_beds() {
        let ws = load(
            "type,beds,baths,sqft,listPrice\n\
             house,3,2,1500,300000\n\
             land,NaN,0,5000,100000\n",
        )
        .unwrap();
        assert_eq!(ws.len(), 1);
        let only = &ws.listings()[0];
        assert_eq!(only.kind, "house");
        assert_eq!(only.beds, RoomCount(3.0));
        assert_eq!(only.list_price, 300_000.0);
    }

    #[test]
    fn farm_rows_with_beds_are_still_dropped() {
        let ws = load(
            "type,beds,baths,sqft,listPrice\n\
             farm,4,3,3000,900000\n\
             condos,,1,600,120000\n\
             townhomes,2,,1100,210000\n",
        )
        .unwrap();
        let kinds: Vec<&str> = ws.listings().iter().map(|l| l.kind.as_str()).collect();
        assert_eq!(kinds, ["townhomes"]);
        assert_eq!(ws.listings()[0].baths, None);
        assert!(ws.options().has_unknown_baths);
    }

    #[test]
    fn row_order_is_preserved() {
        let ws = load(
            "type,beds,baths,sqft,listPrice\n\
             a,1,1,500,1\n\
             b,2,1,600,2\n\
             c,3,1,700,3\n",
        )
        .unwrap();
        let kinds: Vec<&str> = ws.listings().iter().map(|l| l.kind.as_str()).collect();
        assert_eq!(kinds, ["a", "b", "c"]);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let err = load("type,beds,sqft,listPrice\nhouse,3,1500,300000\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("baths")));
    }

    #[test]
    fn empty_price_on_a_kept_row_is_an_error() {
        let err = load("type,beds,baths,sqft,listPrice\nhouse,3,2,1500,\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingValue {
                line: 2,
                column: "listPrice"
            }
        ));
    }

    #[test]
    fn empty_price_on_a_dropped_row_is_ignored() {
        let ws = load(
            "type,beds,baths,sqft,listPrice\n\
             land,,,,\n\
             house,3,2,1500,300000\n",
        )
        .unwrap();
        assert_eq!(ws.len(), 1);
    }

    #[test]
    fn non_numeric_cell_is_malformed() {
        let err = load("type,beds,baths,sqft,listPrice\nhouse,three,2,1500,300000\n").unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn pandas_null_tokens_read_as_missing() {
        let ws = load(
            "type,beds,baths,sqft,listPrice\n\
             condos,NA,1,600,120000\n\
             house,3,null,1500,300000\n\
             townhomes,#N/A,2,1100,210000\n\
             condos,2,<NA>,800,150000\n",
        )
        .unwrap();
        let kinds: Vec<&str> = ws.listings().iter().map(|l| l.kind.as_str()).collect();
        assert_eq!(kinds, ["house", "condos"]);
        assert!(ws.listings().iter().all(|l| l.baths.is_none()));
        assert!(ws.options().has_unknown_baths);
    }

    #[test]
    fn null_token_in_a_required_column_names_the_line() {
        let err = load("type,beds,baths,sqft,listPrice\nhouse,3,2,N/A,300000\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingValue { line: 2, column: "sqft" }));
    }

    #[test]
    fn coordinates_are_detected_from_the_header() {
        let ws = load(
            "type,beds,baths,sqft,listPrice,lat,long\n\
             house,3,2,1500,300000,30.27,-97.74\n\
             condos,1,1,650,180000,,\n",
        )
        .unwrap();
        assert!(ws.has_coordinates());
        assert_eq!(
            ws.listings()[0].location,
            Some(GeoPoint {
                lat: 30.27,
                long: -97.74
            })
        );
        assert_eq!(ws.listings()[1].location, None);
    }

    #[test]
    fn lat_without_long_disables_the_map() {
        let ws = load("type,beds,baths,sqft,listPrice,lat\nhouse,3,2,1500,300000,30.2\n").unwrap();
        assert!(!ws.has_coordinates());
        assert_eq!(ws.listings()[0].location, None);
    }

    #[test]
    fn load_file_reads_from_disk() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            "type,beds,baths,sqft,listPrice\nhouse,3,2,1500,300000\nhouse,2,1,900,180000\n"
        )
        .unwrap();
        let ws = load_file(tmp.path()).unwrap();
        assert_eq!(ws.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
