use reqwest::Client;
use url::Url;

use super::{BodyEncoding, EndpointError, RawResponse};

/// Comma (well, tab) separated values.
pub(crate) const CSV: &str = "CSV";
/// Excel 2002 XML. The server sends it as binary.
pub const SPREADSHEET_ML: &str = "spreadsheetML";

/// Export a report in a particular format
/// (`/rds/outputFormat/report/{source_id}/{output_format}`).
///
/// When `output_format` is [`SPREADSHEET_ML`] the body is the base64 encoding
/// of the bytes the server sent.
pub async fn get_export_by_id(
    client: &Client,
    service_url: &Url,
    source_id: &str,
    query: &[(&str, &str)],
    output_format: &str,
) -> Result<RawResponse, EndpointError> {
    let path = format!(
        "{}/{}",
        super::url("outputFormat", "report", Some(source_id)),
        output_format
    );
    let encoding = if output_format == SPREADSHEET_ML {
        BodyEncoding::Base64
    } else {
        BodyEncoding::Text
    };

    let mut raw =
        super::get(client, service_url, &path, query, encoding).await?;

    if output_format == CSV {
        raw.body = super::replace_invalid_characters(raw.body);
    }

    Ok(raw)
}
