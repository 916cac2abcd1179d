use anyhow::{Context, Result};
use csv::StringRecord;
use std::{collections::HashMap, fs::File, path::Path};

use crate::City;

/// Load unique cities from a CSV with `city` (or `name`), `lat` and `lon`
/// columns.
///
/// Rows with a missing name or unparseable coordinates are skipped. When the
/// same (name, lat, lon) appears twice the later row wins, keeping the
/// position of the first.
pub fn load_cities(path: &Path) -> Result<Vec<City>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open cities file: {}", path.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header of cities file: {}", path.display()))?
        .clone();
    let columns = Columns::from_headers(&headers);

    let mut cities: Vec<City> = Vec::new();
    let mut seen: HashMap<(String, u64, u64), usize> = HashMap::new();

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("skipping unreadable row at line {line}: {e}");
                continue;
            }
        };

        let Some(city) = columns.parse(&record) else {
            tracing::debug!("skipping row at line {line}: no name or coordinates");
            continue;
        };

        match seen.get(&city.key()) {
            Some(&pos) => cities[pos] = city,
            None => {
                seen.insert(city.key(), cities.len());
                cities.push(city);
            }
        }
    }

    Ok(cities)
}

/// Keep only the first `limit` cities. No limit or a limit of 0 keeps all.
pub fn truncate(mut cities: Vec<City>, limit: Option<usize>) -> Vec<City> {
    if let Some(limit) = limit.filter(|&n| n > 0) {
        cities.truncate(limit);
    }
    cities
}

struct Columns {
    city: Option<usize>,
    name: Option<usize>,
    lat: Option<usize>,
    lon: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |wanted: &str| {
            headers.iter().position(|h| {
                h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(wanted)
            })
        };

        Self { city: find("city"), name: find("name"), lat: find("lat"), lon: find("lon") }
    }

    fn parse(&self, record: &StringRecord) -> Option<City> {
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).filter(|s| !s.is_empty());

        let name = field(self.city).or_else(|| field(self.name))?;
        let latitude = field(self.lat)?.parse::<f64>().ok()?;
        let longitude = field(self.lon)?.parse::<f64>().ok()?;

        Some(City::new(name, latitude, longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cities_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn loads_cities_in_any_column_order() {
        let file = cities_file("lon,population,city,lat\n116.4,21,Beijing,39.9\n121.5,24,Shanghai,31.2\n");

        let cities = load_cities(file.path()).expect("load");

        assert_eq!(
            cities,
            vec![City::new("Beijing", 39.9, 116.4), City::new("Shanghai", 31.2, 121.5)]
        );
    }

    #[test]
    fn falls_back_to_name_column() {
        let file = cities_file("name,lat,lon\nOslo,59.91,10.75\n");

        let cities = load_cities(file.path()).expect("load");

        assert_eq!(cities, vec![City::new("Oslo", 59.91, 10.75)]);
    }

    #[test]
    fn deduplicates_by_name_and_coordinates() {
        let file = cities_file(
            "city,lat,lon,time\n\
             Paris,48.85,2.35,2024-01-01T00:00:00\n\
             Paris,48.85,2.35,2024-01-01T01:00:00\n\
             Lyon,45.76,4.84,2024-01-01T00:00:00\n\
             Paris,48.86,2.35,2024-01-01T00:00:00\n\
             Paris,48.85,2.35,2024-01-01T02:00:00\n",
        );

        let cities = load_cities(file.path()).expect("load");

        assert_eq!(
            cities,
            vec![
                City::new("Paris", 48.85, 2.35),
                City::new("Lyon", 45.76, 4.84),
                City::new("Paris", 48.86, 2.35),
            ]
        );
    }

    #[test]
    fn skips_malformed_rows() {
        let file = cities_file(
            "city,lat,lon\n\
             Good,1.5,2.5\n\
             BadLat,north,2.5\n\
             MissingLon,1.5\n\
             EmptyLon,1.5,\n\
             ,3.0,4.0\n\
             Also Good, -33.9 , 151.2 \n",
        );

        let cities = load_cities(file.path()).expect("load");

        assert_eq!(cities, vec![City::new("Good", 1.5, 2.5), City::new("Also Good", -33.9, 151.2)]);
    }

    #[test]
    fn negative_zero_matches_zero() {
        let file = cities_file("city,lat,lon\nNull Island,0.0,-0.0\nNull Island,-0.0,0\n");

        let cities = load_cities(file.path()).expect("load");

        assert_eq!(cities.len(), 1);
    }

    #[test]
    fn header_without_coordinates_yields_nothing() {
        let file = cities_file("city,country\nRome,IT\n");

        let cities = load_cities(file.path()).expect("load");

        assert!(cities.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_cities(&dir.path().join("nope.csv")).unwrap_err();

        assert!(err.to_string().contains("Failed to open cities file"));
    }

    #[test]
    fn truncate_keeps_leading_cities() {
        let cities = vec![City::new("A", 0.0, 0.0), City::new("B", 1.0, 1.0)];

        assert_eq!(truncate(cities.clone(), None).len(), 2);
        assert_eq!(truncate(cities.clone(), Some(0)).len(), 2);
        assert_eq!(truncate(cities.clone(), Some(1)), vec![City::new("A", 0.0, 0.0)]);
        assert_eq!(truncate(cities, Some(10)).len(), 2);
    }
}
