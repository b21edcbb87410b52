//! Tabular view of classified records
//!
//! Builds the DataFrame the dashboard table shows, with the column titles
//! users know from the lane reports.

use polars::prelude::*;

use crate::Result;
use crate::app::models::ClassifiedRecord;

/// Column titles of the tabular view, in display order
pub const VIEW_COLUMNS: &[&str] = &[
    "Vía",
    "Hora",
    "Tránsito",
    "Patente",
    "Tag",
    "Sentido",
    "Estado",
    "Descripción Original",
];

/// Build a DataFrame from records, preserving their order
pub fn records_to_dataframe<'a, I>(records: I) -> Result<DataFrame>
where
    I: IntoIterator<Item = &'a ClassifiedRecord>,
{
    let mut lanes = Vec::new();
    let mut times = Vec::new();
    let mut transits = Vec::new();
    let mut plates = Vec::new();
    let mut tags = Vec::new();
    let mut directions = Vec::new();
    let mut statuses = Vec::new();
    let mut descriptions = Vec::new();

    for record in records {
        lanes.push(record.lane.clone());
        times.push(record.time.clone());
        transits.push(record.transit);
        plates.push(record.plate.clone());
        tags.push(record.tag_id.clone());
        directions.push(record.direction.clone());
        statuses.push(record.status.label().to_string());
        descriptions.push(record.description.clone());
    }

    let df = df!(
        VIEW_COLUMNS[0] => lanes,
        VIEW_COLUMNS[1] => times,
        VIEW_COLUMNS[2] => transits,
        VIEW_COLUMNS[3] => plates,
        VIEW_COLUMNS[4] => tags,
        VIEW_COLUMNS[5] => directions,
        VIEW_COLUMNS[6] => statuses,
        VIEW_COLUMNS[7] => descriptions
    )?;

    Ok(df)
}
