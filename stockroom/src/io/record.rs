use std::str::FromStr;

use crate::entities::StoredBox;
use crate::entities::boxes::RECORD_DELIMITER;
use crate::geometry::geo_enums::{BoxKind, BoxShape};

/// Parses the fields of a record (type tag included) into a box, or describes why it cannot.
pub type RecordParser = fn(&[&str]) -> Result<StoredBox, String>;

/// Maps every record type tag to its parser.
/// `Cubeoid` is accepted as an older spelling of `Cuboid`.
pub const RECORD_PARSERS: [(&str, RecordParser); 5] = [
    ("Cube", parse_cube),
    ("Cuboid", parse_cuboid),
    ("Cubeoid", parse_cuboid),
    ("Sphere", parse_sphere),
    ("Blob", parse_blob),
];

/// Looks up the parser registered for `tag`
pub fn parser_for(tag: &str) -> Option<RecordParser> {
    RECORD_PARSERS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, parser)| *parser)
}

/// Parses one record line, as produced by [`StoredBox::to_record`].
pub fn parse_record(line: &str) -> Result<StoredBox, String> {
    let fields = line.split(RECORD_DELIMITER).collect::<Vec<_>>();
    parse_record_fields(&fields)
}

pub fn parse_record_fields(fields: &[&str]) -> Result<StoredBox, String> {
    let tag = fields.first().copied().unwrap_or_default();
    match parser_for(tag) {
        Some(parser) => parser(fields),
        None => Err(format!("unknown record type '{tag}'")),
    }
}

/// Number of fields in a record of the given kind, type tag included
pub fn n_fields(kind: BoxKind) -> usize {
    match kind {
        BoxKind::Cube | BoxKind::Sphere => 6,
        BoxKind::Cuboid => 8,
        BoxKind::Blob => 5,
    }
}

fn parse_cube(fields: &[&str]) -> Result<StoredBox, String> {
    check_len(fields, BoxKind::Cube)?;
    let (id, description, weight) = parse_common(fields)?;
    let fragile = parse_fragile(fields[4])?;
    let side = parse_field(fields[5], "side")?;
    Ok(StoredBox::new(id, description, weight, fragile, BoxShape::Cube { side }))
}

fn parse_cuboid(fields: &[&str]) -> Result<StoredBox, String> {
    check_len(fields, BoxKind::Cuboid)?;
    let (id, description, weight) = parse_common(fields)?;
    let fragile = parse_fragile(fields[4])?;
    let shape = BoxShape::Cuboid {
        x: parse_field(fields[5], "x side")?,
        y: parse_field(fields[6], "y side")?,
        z: parse_field(fields[7], "z side")?,
    };
    Ok(StoredBox::new(id, description, weight, fragile, shape))
}

fn parse_sphere(fields: &[&str]) -> Result<StoredBox, String> {
    check_len(fields, BoxKind::Sphere)?;
    let (id, description, weight) = parse_common(fields)?;
    let fragile = parse_fragile(fields[4])?;
    let radius = parse_field(fields[5], "radius")?;
    Ok(StoredBox::new(id, description, weight, fragile, BoxShape::Sphere { radius }))
}

fn parse_blob(fields: &[&str]) -> Result<StoredBox, String> {
    check_len(fields, BoxKind::Blob)?;
    let (id, description, weight) = parse_common(fields)?;
    let side = parse_field(fields[4], "side")?;
    Ok(StoredBox::new(id, description, weight, true, BoxShape::Blob { side }))
}

fn check_len(fields: &[&str], kind: BoxKind) -> Result<(), String> {
    let expected = n_fields(kind);
    if fields.len() == expected {
        Ok(())
    } else {
        Err(format!(
            "{kind} record has {} fields, expected {expected}",
            fields.len()
        ))
    }
}

/// id, description and weight, shared by every record type
fn parse_common<'a>(fields: &[&'a str]) -> Result<(usize, &'a str, f64), String> {
    let id: usize = parse_field(fields[1], "id")?;
    if id == 0 {
        return Err("box id must be positive".to_string());
    }
    let weight: f64 = parse_field(fields[3], "weight")?;
    if !weight.is_finite() || weight < 0.0 {
        return Err(format!("invalid weight {weight}"));
    }
    Ok((id, fields[2], weight))
}

fn parse_fragile(field: &str) -> Result<bool, String> {
    match field.trim() {
        "True" => Ok(true),
        "False" => Ok(false),
        other => Err(format!("invalid fragile flag '{other}'")),
    }
}

fn parse_field<T: FromStr>(field: &str, name: &str) -> Result<T, String> {
    field
        .trim()
        .parse()
        .map_err(|_| format!("invalid {name} '{field}'"))
}
