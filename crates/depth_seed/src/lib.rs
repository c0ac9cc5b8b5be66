//! Seed Roster Builder
//!
//! CSV roster export → validated, densely ordered JSON seed + SHA256 checksum

use anyhow::{Context, Result};
use depth_core::{check_dense, seed, DensityViolation, Player, PlayerId, Position, Status};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use validator::Validate;

/// Seed metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMetadata {
    /// Number of players written
    pub count: usize,
    /// Players per position code
    pub positions: BTreeMap<String, usize>,
    /// SHA256 checksum of the written file (hex)
    pub checksum: String,
    /// Creation time (RFC3339)
    pub created_at: String,
}

/// CSV import statistics
#[derive(Debug, Clone, Default)]
pub struct ImportStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
    /// Players whose order changed while closing gaps
    pub renumbered: usize,
}

/// Result of checking an existing seed file
#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub count: usize,
    pub checksum: String,
    pub violations: Vec<DensityViolation>,
}

impl VerifyReport {
    pub fn is_dense(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Column indices resolved from the CSV header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    first_name: usize,
    last_name: usize,
    jersey: usize,
    position: usize,
    order: usize,
    status: usize,
    id: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).with_context(|| format!("CSV header is missing the {name} column"))
        };

        Ok(Self {
            first_name: require("FirstName")?,
            last_name: require("LastName")?,
            jersey: require("Jersey")?,
            position: require("Position")?,
            order: require("Order")?,
            status: require("Status")?,
            id: find("Id"),
        })
    }
}

fn field<'r>(record: &'r csv::StringRecord, idx: usize, name: &str) -> Result<&'r str, String> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| format!("missing {name} field"))
}

fn parse_row(record: &csv::StringRecord, cols: &Columns) -> Result<Player, String> {
    let jersey_raw = field(record, cols.jersey, "Jersey")?;
    let jersey = jersey_raw
        .parse::<u32>()
        .map_err(|_| format!("invalid Jersey value: '{jersey_raw}'"))?;
    let order_raw = field(record, cols.order, "Order")?;
    let order = order_raw
        .parse::<u32>()
        .map_err(|_| format!("invalid Order value: '{order_raw}'"))?;
    let position = field(record, cols.position, "Position")?
        .parse::<Position>()
        .map_err(|e| e.to_string())?;
    let status = field(record, cols.status, "Status")?
        .parse::<Status>()
        .map_err(|e| e.to_string())?;

    let mut player = Player::new(
        field(record, cols.first_name, "FirstName")?,
        field(record, cols.last_name, "LastName")?,
        jersey,
        position,
        order,
        status,
    );

    // Blank Id cells get the freshly generated id
    if let Some(idx) = cols.id {
        let raw = field(record, idx, "Id")?;
        if !raw.is_empty() {
            player.id = raw.parse::<PlayerId>().map_err(|e| e.to_string())?;
        }
    }

    player.validate().map_err(|e| e.to_string())?;
    Ok(player)
}

/// Parse a roster CSV into players with dense per-position ordering
///
/// Expected header (any case, any column order):
/// `FirstName,LastName,Jersey,Position,Order,Status[,Id]`
///
/// Rows that fail to parse or validate are reported and skipped.
/// Positions with gaps or duplicate orders are renumbered.
pub fn parse_roster_csv(csv_path: &Path) -> Result<(Vec<Player>, ImportStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let cols = Columns::from_headers(&headers)?;

    let mut stats = ImportStats::default();
    let mut seen = HashSet::new();
    let mut players = Vec::new();

    for result in reader.records() {
        stats.total_rows += 1;
        let line = stats.total_rows + 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                stats.failed += 1;
                eprintln!("Warning: Line {line} - CSV parse error: {e}");
                continue;
            }
        };

        match parse_row(&record, &cols) {
            Ok(player) if !seen.insert(player.id) => {
                stats.failed += 1;
                eprintln!("Warning: Line {line} - duplicate id {}, skipping", player.id);
            }
            Ok(player) => {
                players.push(player);
                stats.parsed += 1;
            }
            Err(e) => {
                stats.failed += 1;
                eprintln!("Warning: Line {line} - {e}, skipping");
            }
        }
    }

    if players.is_empty() {
        anyhow::bail!("No valid players parsed from CSV");
    }

    stats.renumbered = seed::normalize_seed(&mut players);
    Ok((players, stats))
}

fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Write players as a pretty-printed JSON seed, sorted for display
pub fn write_seed(players: &[Player], out: &Path) -> Result<SeedMetadata> {
    let mut sorted = players.to_vec();
    depth_core::models::sort_for_display(&mut sorted);

    let json = serde_json::to_string_pretty(&sorted).context("Failed to serialize players")?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(out, json.as_bytes())
        .with_context(|| format!("Failed to write seed file: {}", out.display()))?;

    let mut positions = BTreeMap::new();
    for player in &sorted {
        *positions.entry(player.position.code().to_string()).or_insert(0) += 1;
    }

    Ok(SeedMetadata {
        count: sorted.len(),
        positions,
        checksum: checksum(json.as_bytes()),
        created_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// CSV → JSON seed in one step
pub fn import_csv(csv_path: &Path, out: &Path) -> Result<(SeedMetadata, ImportStats)> {
    let (players, stats) = parse_roster_csv(csv_path)?;
    let meta = write_seed(&players, out)?;
    Ok((meta, stats))
}

/// Check an existing seed file without renumbering it
pub fn verify_seed(path: &Path) -> Result<VerifyReport> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read seed file: {}", path.display()))?;
    let json = std::str::from_utf8(&bytes).context("Seed file is not UTF-8")?;
    let players = seed::parse_records(json)?;

    Ok(VerifyReport {
        count: players.len(),
        checksum: checksum(&bytes),
        violations: check_dense(&players),
    })
}

/// JSON Schema of one seed record
pub fn seed_schema() -> Result<String> {
    let schema = schemars::schema_for!(Player);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(contents.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_import_normalizes_and_skips_bad_rows() -> Result<()> {
        let csv = csv_file(
            "firstname,LASTNAME,Jersey,Position,Order,Status\n\
             Dak,Prescott,4,QB,1,A\n\
             Cooper,Rush,10,QB,3,A\n\
             Trey,Lance,15,QB,,A\n\
             Brandon,Aubrey,17,K,1,A\n\
             Nobody,Home,1,WR,1,A\n",
        )?;

        let (players, stats) = parse_roster_csv(csv.path())?;

        assert_eq!(stats.total_rows, 5);
        assert_eq!(stats.parsed, 3);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.renumbered, 1);

        let rush = players.iter().find(|p| p.last_name == "Rush").unwrap();
        assert_eq!(rush.order, 2);
        assert!(depth_core::is_dense(&players));
        Ok(())
    }

    #[test]
    fn test_id_column_is_optional_and_kept_when_present() -> Result<()> {
        let csv = csv_file(
            "Id,FirstName,LastName,Jersey,Position,Order,Status\n\
             7b1c3f4e-8d2a-4e5b-9c6d-0a1b2c3d4e5f,CeeDee,Lamb,88,X,1,A\n\
             ,Jalen,Tolbert,1,X,2,P\n",
        )?;

        let (players, _) = parse_roster_csv(csv.path())?;
        assert_eq!(players[0].id.to_string(), "7b1c3f4e-8d2a-4e5b-9c6d-0a1b2c3d4e5f");
        assert_ne!(players[1].id, players[0].id);
        assert_eq!(players[1].status, Status::PracticeSquad);
        Ok(())
    }

    #[test]
    fn test_duplicate_ids_are_skipped() -> Result<()> {
        let csv = csv_file(
            "Id,FirstName,LastName,Jersey,Position,Order,Status\n\
             7b1c3f4e-8d2a-4e5b-9c6d-0a1b2c3d4e5f,CeeDee,Lamb,88,X,1,A\n\
             7b1c3f4e-8d2a-4e5b-9c6d-0a1b2c3d4e5f,Jalen,Tolbert,1,X,2,A\n",
        )?;

        let (players, stats) = parse_roster_csv(csv.path())?;
        assert_eq!(players.len(), 1);
        assert_eq!(stats.failed, 1);
        Ok(())
    }

    #[test]
    fn test_missing_column_is_an_error() -> Result<()> {
        let csv = csv_file("FirstName,LastName,Jersey,Position,Status\nDak,Prescott,4,QB,A\n")?;
        let err = parse_roster_csv(csv.path()).unwrap_err();
        assert!(err.to_string().contains("Order"));
        Ok(())
    }

    #[test]
    fn test_no_valid_rows_is_an_error() -> Result<()> {
        let csv = csv_file("FirstName,LastName,Jersey,Position,Order,Status\nDak,Prescott,4,QB,1,Z\n")?;
        assert!(parse_roster_csv(csv.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_import_then_verify() -> Result<()> {
        let csv = csv_file(
            "FirstName,LastName,Jersey,Position,Order,Status\n\
             Micah,Parsons,11,WLB,1,A\n\
             Trevon,Diggs,7,LCB,1,I\n\
             DaRon,Bland,26,LCB,2,A\n",
        )?;
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("nested").join("players.json");

        let (meta, stats) = import_csv(csv.path(), &out)?;
        assert_eq!(meta.count, 3);
        assert_eq!(meta.positions.get("LCB"), Some(&2));
        assert_eq!(meta.positions.get("WLB"), Some(&1));
        assert_eq!(stats.renumbered, 0);

        let report = verify_seed(&out)?;
        assert_eq!(report.count, 3);
        assert_eq!(report.checksum, meta.checksum);
        assert!(report.is_dense());

        // The written seed loads through the server's loader unchanged
        let loaded = seed::load_seed(&out)?;
        assert_eq!(loaded.len(), 3);
        Ok(())
    }

    #[test]
    fn test_verify_reports_gaps() -> Result<()> {
        let file = csv_file(
            r#"[
                {"firstName": "Dak", "lastName": "Prescott", "jersey": 4, "position": "QB", "order": 1, "status": "A"},
                {"firstName": "Cooper", "lastName": "Rush", "jersey": 10, "position": "QB", "order": 3, "status": "A"}
            ]"#,
        )?;

        let report = verify_seed(file.path())?;
        assert!(!report.is_dense());
        assert_eq!(report.violations[0].position, Position::QB);
        assert_eq!(report.violations[0].orders, vec![1, 3]);
        Ok(())
    }

    #[test]
    fn test_schema_names_record_fields() -> Result<()> {
        let schema = seed_schema()?;
        for field in ["firstName", "lastName", "jersey", "position", "order", "status"] {
            assert!(schema.contains(field), "schema missing {field}");
        }
        Ok(())
    }
}
