use crate::error::check_height;
use crate::{HeightModel, IndexPath, LayoutError};

/// Offset of `index_path` from the top of the first section.
///
/// Sums every header and row before the target. For a header (`row == -1`) the target
/// section's own header is excluded; for a row the header and the rows before it are included.
/// The list's own header is not part of the result: add it when scrolling a list that has one
/// (see [`crate::ListLayout::offset_for`]).
///
/// This walks the model linearly and does not need a computed layout, so it stays valid for
/// navigation even while a layout is being rebuilt.
pub fn index_path_offset<M: HeightModel + ?Sized>(
    model: &M,
    index_path: IndexPath,
) -> Result<f64, LayoutError> {
    let out_of_range = LayoutError::IndexPathOutOfRange { index_path };
    if index_path.section >= model.section_count() {
        return Err(out_of_range);
    }
    let target_row = match index_path.row_index() {
        Some(row) if row >= model.row_count(index_path.section) => return Err(out_of_range),
        Some(row) => Some(row),
        None if index_path.is_header() => None,
        None => return Err(out_of_range),
    };

    let mut offset = 0.0;
    for section in 0..index_path.section {
        offset += section_extent(model, section)?;
    }
    let Some(target_row) = target_row else {
        return Ok(offset);
    };

    let section = index_path.section;
    offset += check_height(IndexPath::header(section), model.section_height(section))?;
    for row in 0..target_row {
        let path = IndexPath::row(section, row);
        offset += check_height(path, model.row_height(path))?;
    }
    Ok(offset)
}

/// Height of a whole section: its header plus all of its rows.
pub fn section_extent<M: HeightModel + ?Sized>(
    model: &M,
    section: usize,
) -> Result<f64, LayoutError> {
    let mut extent = check_height(IndexPath::header(section), model.section_height(section))?;
    for row in 0..model.row_count(section) {
        let path = IndexPath::row(section, row);
        extent += check_height(path, model.row_height(path))?;
    }
    Ok(extent)
}
