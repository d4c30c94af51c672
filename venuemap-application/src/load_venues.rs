use super::*;
use std::{fs::File, io, path::Path};
use tempfile::NamedTempFile;
use venuemap_boundary::VenueRecord;

pub fn read_venue_records<R: io::Read>(reader: R) -> Result<Vec<VenueRecord>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let records = rdr.deserialize().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

pub fn write_venue_records<W: io::Write>(writer: W, records: &[VenueRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for r in records {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Replace the rows of a CSV file.
///
/// The rows are written into a temporary file next to the target,
/// the target is only replaced when all rows have been written.
pub fn save_venue_records(path: &Path, records: &[VenueRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    write_venue_records(&mut file, records)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    debug!("Saved {} venue rows to {}", records.len(), path.display());
    Ok(())
}

fn new_venue(record: &VenueRecord) -> usecases::NewVenue {
    let VenueRecord {
        name,
        address1,
        address2,
        town,
        post_code,
        country,
        venue_type,
        county,
        account_manager,
        phone,
        latitude,
        longitude,
    } = record.clone();
    usecases::NewVenue {
        name,
        address1,
        address2,
        town,
        post_code,
        country,
        category: venue_type,
        region: county,
        contact_name: account_manager,
        phone,
        lat: latitude,
        lng: longitude,
    }
}

/// Turn spreadsheet rows into venues.
///
/// The id of a venue is the index of its row.
pub fn venues_from_records(records: &[VenueRecord], service_area: &MapBbox) -> Vec<Venue> {
    let venues: Vec<_> = records
        .iter()
        .enumerate()
        .map(|(idx, r)| usecases::prepare_venue(idx as VenueId, new_venue(r), service_area))
        .collect();
    let resolved = venues.iter().filter(|v| v.is_resolved()).count();
    info!(
        "Loaded {} venues ({} with coordinates)",
        venues.len(),
        resolved
    );
    venues
}

pub fn load_venues_from_file(path: &Path, service_area: &MapBbox) -> Result<(Vec<VenueRecord>, Vec<Venue>)> {
    debug!("Reading venues from {}", path.display());
    let records = read_venue_records(File::open(path)?)?;
    let venues = venues_from_records(&records, service_area);
    Ok((records, venues))
}

/// Copy resolved coordinates into the rows that do not have any.
///
/// Returns the number of updated rows.
pub fn fill_in_coordinates(records: &mut [VenueRecord], venues: &[Venue]) -> usize {
    let mut count = 0;
    for venue in venues {
        let (Some(pos), Some(record)) = (venue.pos, records.get_mut(venue.id as usize)) else {
            continue;
        };
        if record.latitude.is_some() && record.longitude.is_some() {
            continue;
        }
        record.latitude = Some(pos.lat());
        record.longitude = Some(pos.lng());
        count += 1;
    }
    count
}
