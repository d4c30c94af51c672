use crate::config::{self, GeocodingGateway};
use anyhow::Result;
use venuemap_gateways::{
    fs_file::FsFileGateway, json_file_store::JsonFileStore, nominatim, nominatim::Nominatim,
    text_document::TextDocumentGateway,
};

pub fn geocoding_gateway(cfg: &config::Geocoding) -> Result<Option<Nominatim>> {
    let Some(gateway) = &cfg.gateway else {
        log::warn!("No geocoding gateway was configured");
        return Ok(None);
    };
    let gw = match gateway {
        GeocodingGateway::Nominatim {
            base_url,
            user_agent,
            country_codes,
            max_retries,
            timeout,
        } => {
            let base_url = base_url.as_deref().unwrap_or(nominatim::DEFAULT_BASE_URL);
            log::info!("Use Nominatim gateway ({base_url})");
            let mut gw = Nominatim::try_new(base_url, user_agent, *timeout)?;
            if let Some(codes) = country_codes {
                gw = gw.with_country_codes(codes.as_str());
            }
            if let Some(max_retries) = max_retries {
                gw = gw.with_max_retries(*max_retries);
            }
            gw
        }
    };
    Ok(Some(gw))
}

pub fn circle_store(cfg: &config::Store) -> Result<JsonFileStore> {
    log::debug!("Open circle store in {}", cfg.dir.display());
    Ok(JsonFileStore::try_new(&cfg.dir)?)
}

/// Files given on the command line are relative to the working directory.
pub fn file_gateway() -> FsFileGateway {
    FsFileGateway::new(".")
}

pub fn document_gateway(cfg: &config::Report) -> TextDocumentGateway {
    TextDocumentGateway::new(&cfg.output_dir)
}
