use std::io::Write;

use anyhow::{Context, Result, bail, ensure};
use itertools::Itertools;
use log::info;

use stockroom::entities::boxes::MAX_DESCRIPTION_LEN;
use stockroom::entities::{StoredBox, Warehouse};
use stockroom::geometry::geo_enums::BoxKind;

use crate::io::cli::{Command, ShapeArg};

/// Runs a command and saves the warehouse to its database file if the command changed it.
/// The report reaches `out` only after the change is saved.
pub fn run<W: Write>(command: &Command, warehouse: &mut Warehouse, out: &mut W) -> Result<()> {
    let mut report = Vec::new();
    let changed = execute(command, warehouse, &mut report)?;
    if changed {
        warehouse.save().with_context(|| {
            format!(
                "the change was not saved, could not write {}",
                warehouse.database_path().display()
            )
        })?;
    }
    out.write_all(&report)?;
    Ok(())
}

/// Runs a command against a loaded warehouse, writing the user facing report to `out`.
/// Returns whether the warehouse was changed.
///
/// `Init` is not handled here, it creates a new warehouse instead of working on one.
pub fn execute<W: Write>(command: &Command, warehouse: &mut Warehouse, out: &mut W) -> Result<bool> {
    match command {
        Command::Init { .. } => bail!("init does not operate on an existing warehouse"),
        Command::Add {
            shape,
            dimensions,
            description,
            weight,
            fragile,
            location,
            floor,
        } => {
            validate_description(description)?;
            ensure!(
                weight.is_finite() && *weight >= 0.0,
                "weight must be a non-negative number, got {weight}"
            );
            let target = match (location, floor) {
                (Some(l), Some(f)) => Some(validate_cell(warehouse, *l, *f)?),
                _ => None,
            };
            let item = create_box(warehouse, *shape, dimensions, description, *weight, *fragile)?;
            add(warehouse, &item, target, out)?;
            Ok(true)
        }
        Command::Find { id } => {
            let Some(idx) = warehouse.find_box(*id) else {
                bail!("no box with id {id} in the warehouse");
            };
            let Some(item) = warehouse.retrieve_copy(*id, idx.location, idx.floor) else {
                bail!("box {id} vanished from {idx}");
            };
            writeln!(out, "Box {id} is stored at {idx}.")?;
            writeln!(out, "{item}")?;
            Ok(false)
        }
        Command::Show { location, floor } => {
            let (l, f) = validate_cell(warehouse, *location, *floor)?;
            let boxes = warehouse.boxes_at(l, f);
            if boxes.is_empty() {
                writeln!(out, "No boxes at location {l}, floor {f}.")?;
            } else {
                writeln!(out, "Boxes at location {l}, floor {f}:")?;
                for item in boxes {
                    writeln!(out, "  {}", item.short_string())?;
                }
            }
            Ok(false)
        }
        Command::List => {
            if warehouse.n_boxes() == 0 {
                writeln!(out, "The warehouse is empty.")?;
            }
            for (idx, group) in &warehouse.stored_boxes().chunk_by(|(idx, _)| *idx) {
                writeln!(out, "{idx}:")?;
                for (_, item) in group {
                    writeln!(out, "  {}", item.short_string())?;
                }
            }
            Ok(false)
        }
        Command::Move { id, location, floor } => {
            let (l, f) = validate_cell(warehouse, *location, *floor)?;
            ensure!(warehouse.find_box(*id).is_some(), "no box with id {id} in the warehouse");
            if !warehouse.move_box(*id, l, f) {
                bail!("box {id} does not fit at location {l}, floor {f}");
            }
            writeln!(out, "Box {id} moved to location {l}, floor {f}.")?;
            Ok(true)
        }
        Command::Remove { id } => {
            if !warehouse.remove_box(*id) {
                bail!("no box with id {id} in the warehouse, nothing removed");
            }
            writeln!(out, "Box {id} removed.")?;
            Ok(true)
        }
    }
}

/// A description is required and may hold at most [`MAX_DESCRIPTION_LEN`] characters
pub fn validate_description(description: &str) -> Result<()> {
    ensure!(!description.trim().is_empty(), "the description can't be left empty");
    let n_chars = description.chars().count();
    ensure!(
        n_chars <= MAX_DESCRIPTION_LEN,
        "the description is {n_chars} characters long, at most {MAX_DESCRIPTION_LEN} are allowed"
    );
    Ok(())
}

/// Checks a user supplied cell against the grid, the reserved location and floor 0 excluded.
pub fn validate_cell(warehouse: &Warehouse, location: usize, floor: usize) -> Result<(usize, usize)> {
    let (n_locations, n_floors) = (warehouse.n_locations(), warehouse.n_floors());
    ensure!(
        (1..n_locations).contains(&location),
        "location must lie between 1 and {}, got {location}",
        n_locations.saturating_sub(1)
    );
    ensure!(
        (1..n_floors).contains(&floor),
        "floor must lie between 1 and {}, got {floor}",
        n_floors.saturating_sub(1)
    );
    Ok((location, floor))
}

fn create_box(
    warehouse: &mut Warehouse,
    shape: ShapeArg,
    dimensions: &[u32],
    description: &str,
    weight: f64,
    fragile: bool,
) -> Result<StoredBox> {
    let item = match (shape, dimensions) {
        (ShapeArg::Cube, &[side]) => warehouse.create_cube(description, weight, fragile, side),
        (ShapeArg::Cuboid, &[x, y, z]) => warehouse.create_cuboid(description, weight, fragile, x, y, z),
        (ShapeArg::Sphere, &[radius]) => warehouse.create_sphere(description, weight, fragile, radius),
        (ShapeArg::Blob, &[side]) => warehouse.create_blob(description, weight, side),
        _ => bail!(
            "a {} takes {} dimension(s), got {}",
            BoxKind::from(shape),
            shape.n_dimensions(),
            dimensions.len()
        ),
    };
    Ok(item)
}

fn add<W: Write>(
    warehouse: &mut Warehouse,
    item: &StoredBox,
    target: Option<(usize, usize)>,
    out: &mut W,
) -> Result<()> {
    match target {
        Some((l, f)) => {
            if let Err(rejection) = warehouse.cell(l, f).admission(item) {
                bail!("the box can't be placed at location {l}, floor {f}: {rejection}");
            }
            let stored = warehouse.store_manually(item, l, f);
            debug_assert!(stored);
            writeln!(out, "Box stored at location {l}, floor {f}.")?;
        }
        None => match warehouse.store_automatically(item) {
            Some(idx) => writeln!(out, "Box stored at {idx}.")?,
            None => bail!("there is no room for the box in the warehouse"),
        },
    }
    info!("[CLI] created {}", item.short_string());
    writeln!(out, "The box has id {}.", item.id())?;
    Ok(())
}
