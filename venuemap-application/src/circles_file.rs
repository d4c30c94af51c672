use super::*;
use std::convert::TryFrom;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use venuemap_boundary as json;
use venuemap_core::gateways::{file::FileGateway, render::RenderingSurface};

pub fn circles_to_json(circles: &[CircleSnapshot], exported_at: OffsetDateTime) -> Result<Vec<u8>> {
    let export = json::CirclesExport {
        version: json::CIRCLES_EXPORT_VERSION,
        exported_at: exported_at.format(&Rfc3339)?,
        circles: circles.iter().copied().map(json::Circle::from).collect(),
    };
    Ok(serde_json::to_vec_pretty(&export)?)
}

/// Read the circles of an export file or of a plain list.
pub fn circles_from_json(bytes: &[u8]) -> Result<Vec<CircleSnapshot>> {
    let file: json::CirclesFile = serde_json::from_slice(bytes)
        .map_err(|err| usecases::Error::InvalidImportData(err.to_string()))?;
    if let json::CirclesFile::Export(json::CirclesExport { version, .. }) = &file {
        if *version > json::CIRCLES_EXPORT_VERSION {
            warn!("Reading circles of the unknown export version {version}");
        }
    }
    let circles = file
        .into_circles()
        .into_iter()
        .map(CircleSnapshot::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|err| usecases::Error::InvalidImportData(err.to_string()))?;
    Ok(circles)
}

pub fn export_circles<R, S, F>(
    state: &MapState<R, S>,
    file_gateway: &F,
    file_name: &str,
    exported_at: OffsetDateTime,
) -> Result<()>
where
    R: RenderingSurface,
    S: CircleRepo,
    F: FileGateway,
{
    let circles = state.snapshot();
    let bytes = circles_to_json(&circles, exported_at)?;
    file_gateway.save_as(file_name, &bytes)?;
    info!("Exported {} circle(s) to {file_name}", circles.len());
    Ok(())
}

/// Replace all circles with the contents of a file.
///
/// Returns the number of imported circles.
pub fn import_circles<R, S, F>(
    state: &mut MapState<R, S>,
    file_gateway: &F,
    file_name: &str,
) -> Result<usize>
where
    R: RenderingSurface,
    S: CircleRepo,
    F: FileGateway,
{
    let bytes = file_gateway.open(file_name)?;
    let circles = circles_from_json(&bytes).map_err(|err| {
        warn!("Failed to import circles from {file_name}: {err}");
        err
    })?;
    let count = circles.len();
    state.restore(circles)?;
    info!("Imported {count} circle(s) from {file_name}");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::*, tests::prelude::*};
    use time::macros::datetime;

    fn london() -> MapPoint {
        MapPoint::from_lat_lng_deg(51.5, -0.1)
    }

    #[test]
    fn export_envelope() {
        let circles = vec![CircleSnapshot {
            id: 1,
            center: london(),
            radius: Distance::from_meters(2_000.0),
        }];
        let bytes = circles_to_json(&circles, datetime!(2024-03-01 12:30:00 UTC)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(1, value["version"]);
        assert_eq!("2024-03-01T12:30:00Z", value["exported_at"]);
        assert_eq!(51.5, value["circles"][0]["center"]["lat"]);
        assert_eq!(2000.0, value["circles"][0]["radius"]);
        assert_eq!(circles, circles_from_json(&bytes).unwrap());
    }

    #[test]
    fn import_bare_list() {
        let bytes = br#"[
            { "id": 5, "center": { "lat": 51.5, "lng": -0.1 }, "radius": 1000 },
            { "id": 7, "center": { "lat": 51.6, "lng": -0.1 }, "radius": 2000 }
        ]"#;
        let circles = circles_from_json(bytes).unwrap();
        assert_eq!(vec![5, 7], circles.iter().map(|c| c.id).collect::<Vec<_>>());
    }

    #[test]
    fn reject_malformed_files() {
        for bytes in [
            &b"not json"[..],
            &br#"{ "version": 1 }"#[..],
            &br#"[{ "id": 1, "center": { "lat": 91.0, "lng": 0.0 }, "radius": 1000 }]"#[..],
            &br#"[{ "id": -1, "center": { "lat": 51.0, "lng": 0.0 }, "radius": 1000 }]"#[..],
        ] {
            assert!(matches!(
                circles_from_json(bytes),
                Err(AppError::Business(BError::Parameter(
                    usecases::Error::InvalidImportData(_)
                )))
            ));
        }
    }

    #[test]
    fn export_and_import_through_the_file_gateway() {
        let files = MemoryFiles::default();
        let mut state = new_state(vec![]);
        state.create_circle_at(london()).unwrap();
        state.create_circle_at(london()).unwrap();
        state.delete_circle(1).unwrap();
        export_circles(&state, &files, "circles.json", OffsetDateTime::UNIX_EPOCH).unwrap();

        let mut other = new_state(vec![]);
        assert_eq!(1, import_circles(&mut other, &files, "circles.json").unwrap());
        // renumbered
        assert_eq!(1, other.snapshot()[0].id);
        assert_eq!(Some(other.snapshot()), other.store().stored());
    }

    #[test]
    fn failed_import_keeps_the_circles() {
        let files = MemoryFiles::default();
        files.put("broken.json", br#"[{ "id": 1, "center": { "lat": 51.0, "lng": 0.0 }, "radius": -3 }]"#);
        let mut state = new_state(vec![]);
        state.create_circle_at(london()).unwrap();
        let before = state.snapshot();
        let err = import_circles(&mut state, &files, "broken.json").unwrap_err();
        assert!(err.is_user_visible());
        assert_eq!(before, state.snapshot());
        assert!(matches!(
            import_circles(&mut state, &files, "missing.json"),
            Err(AppError::Io(_))
        ));
    }
}
