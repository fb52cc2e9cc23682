use reqwest::Client;
use url::Url;

use super::{BodyEncoding, EndpointError, RawResponse};

/// List the reports in a folder (`/rds/wsil/path/{folder_path}`).
///
/// The folder path is used as-is, e.g. `Public Folders/Samples`.
pub async fn get_reports(
    client: &Client,
    service_url: &Url,
    folder_path: &str,
) -> Result<RawResponse, EndpointError> {
    let path = super::url("wsil", "path", Some(folder_path));

    super::get(client, service_url, &path, &[], BodyEncoding::Text).await
}
