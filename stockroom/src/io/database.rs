use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, error, info};

use crate::entities::boxes::RECORD_DELIMITER;
use crate::entities::{CellGrid, CellIndex};
use crate::io::error::DatabaseError;
use crate::io::record;
use crate::util::CellConfig;

/// Label preceding the grid dimensions on the first line of a database file
pub const HEADER_LABEL: &str = "Length of database ";

/// Upper bound on the number of cells a database header may declare
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Writes the full grid to `path`, replacing any previous content of the file.
pub fn write_database(path: &Path, grid: &CellGrid) -> Result<(), DatabaseError> {
    let result = File::create(path).and_then(|file| {
        let mut writer = BufWriter::new(file);
        write_grid(&mut writer, grid)?;
        writer.flush()
    });
    match result {
        Ok(()) => {
            info!("[DB] database written to {}", path.display());
            Ok(())
        }
        Err(e) => {
            let err = DatabaseError::from(e);
            error!("[DB] {}: could not write {}: {err}", err.kind(), path.display());
            Err(err)
        }
    }
}

/// Serializes the grid: a header with its dimensions, followed by a marker line for every
/// non-reserved cell and a record line for every box in it.
pub fn write_grid<W: Write>(writer: &mut W, grid: &CellGrid) -> std::io::Result<()> {
    let d = RECORD_DELIMITER;
    writeln!(writer, "{HEADER_LABEL}{d}{}{d}{}", grid.n_locations(), grid.n_floors())?;
    for (idx, cell) in grid.usable() {
        writeln!(writer, "{}{d}{}", idx.location, idx.floor)?;
        for item in cell {
            writeln!(writer, "{}", item.to_record())?;
        }
    }
    Ok(())
}

/// Reads a grid from `path`. Every cell is created with the capacity in `cell_config`.
///
/// Fails without returning any partial state when the file cannot be read or is corrupt.
pub fn read_database(path: &Path, cell_config: &CellConfig) -> Result<CellGrid, DatabaseError> {
    let result = File::open(path)
        .map_err(DatabaseError::from)
        .and_then(|file| read_grid(BufReader::new(file), cell_config));
    match &result {
        Ok(grid) => info!(
            "[DB] read {} boxes in a {}x{} grid from {}",
            grid.usable().map(|(_, c)| c.len()).sum::<usize>(),
            grid.n_locations(),
            grid.n_floors(),
            path.display()
        ),
        Err(err) => error!("[DB] {}: could not read {}: {err}", err.kind(), path.display()),
    }
    result
}

pub fn read_grid<R: BufRead>(reader: R, cell_config: &CellConfig) -> Result<CellGrid, DatabaseError> {
    let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (n_locations, n_floors) = match lines.next() {
        Some((line_nr, line)) => {
            parse_header(&line?).map_err(|r| DatabaseError::corrupt(line_nr, r))?
        }
        None => return Err(DatabaseError::corrupt(1, "database is empty")),
    };
    let mut grid = CellGrid::new(n_locations, n_floors, cell_config);

    let mut current: Option<CellIndex> = None;
    let mut seen_ids = HashSet::new();
    for (line_nr, line) in lines {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let fields = line.split(RECORD_DELIMITER).collect::<Vec<_>>();

        if fields[0].trim().parse::<i64>().is_ok() {
            let idx = parse_marker(&fields, &grid).map_err(|r| DatabaseError::corrupt(line_nr, r))?;
            debug!("[DB] line {line_nr}: entering cell ({idx})");
            current = Some(idx);
            continue;
        }

        let item = record::parse_record_fields(&fields)
            .map_err(|r| DatabaseError::corrupt(line_nr, r))?;
        let Some(idx) = current else {
            return Err(DatabaseError::corrupt(line_nr, "box record before any cell marker"));
        };
        if !seen_ids.insert(item.id()) {
            return Err(DatabaseError::corrupt(line_nr, format!("duplicate box id {}", item.id())));
        }
        let cell = grid.get_mut(idx.location, idx.floor);
        if let Err(rejection) = cell.admission(&item) {
            return Err(DatabaseError::corrupt(
                line_nr,
                format!("box {} does not fit in cell ({idx}): {rejection}", item.id()),
            ));
        }
        cell.add(&item);
    }

    Ok(grid)
}

fn parse_header(line: &str) -> Result<(usize, usize), String> {
    let fields = line.trim_end_matches('\r').split(RECORD_DELIMITER).collect::<Vec<_>>();
    let [_label, locations, floors] = fields.as_slice() else {
        return Err(format!("malformed header '{line}'"));
    };
    let (Ok(n_locations), Ok(n_floors)) = (
        locations.trim().parse::<usize>(),
        floors.trim().parse::<usize>(),
    ) else {
        return Err(format!("header '{line}' does not hold the grid dimensions"));
    };
    match usize::checked_mul(n_locations, n_floors) {
        Some(n) if n <= MAX_GRID_CELLS => Ok((n_locations, n_floors)),
        _ => Err(format!("grid of {n_locations}x{n_floors} cells is too large")),
    }
}

fn parse_marker(fields: &[&str], grid: &CellGrid) -> Result<CellIndex, String> {
    let [location, floor] = fields else {
        return Err(format!("cell marker has {} fields, expected 2", fields.len()));
    };
    let (Ok(location), Ok(floor)) = (
        location.trim().parse::<usize>(),
        floor.trim().parse::<usize>(),
    ) else {
        return Err(format!("invalid cell marker '{}'", fields.join("#")));
    };
    if !grid.contains(location, floor) {
        return Err(format!("cell ({location}, {floor}) lies outside the grid"));
    }
    if location == 0 || floor == 0 {
        return Err(format!("cell ({location}, {floor}) is reserved"));
    }
    Ok(CellIndex::new(location, floor))
}
