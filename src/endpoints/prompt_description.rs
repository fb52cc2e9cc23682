use reqwest::Client;
use url::Url;

use super::{BodyEncoding, EndpointError, RawResponse};

/// Get the descriptions of a report's prompts as an RDS schema document
/// (`/rds/promptDescription/report/{source_id}`).
///
/// This resource exists in version 10.2.2 of the REST API and is deprecated
/// after that.
pub async fn get_prompt_description_by_id(
    client: &Client,
    service_url: &Url,
    source_id: &str,
    query: &[(&str, &str)],
) -> Result<RawResponse, EndpointError> {
    let path = super::url("promptDescription", "report", Some(source_id));

    super::get(client, service_url, &path, query, BodyEncoding::Text).await
}
