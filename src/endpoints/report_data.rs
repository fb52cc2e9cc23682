use reqwest::Client;
use url::Url;

use super::{BodyEncoding, EndpointError, RawResponse};

/// Run a report (`/rds/reportData/report/{source_id}`).
///
/// `query` is passed to the server untouched, so it's used for prompt values
/// (`p_Region=North`) as well as options like `fmt` or `rowLimit`.
pub async fn get_report_by_id(
    client: &Client,
    service_url: &Url,
    source_id: &str,
    query: &[(&str, &str)],
) -> Result<RawResponse, EndpointError> {
    let path = super::url("reportData", "report", Some(source_id));

    super::get(client, service_url, &path, query, BodyEncoding::Text).await
}
