use reqwest::Client;
use url::Url;

use super::{BodyEncoding, EndpointError, RawResponse};

/// Tell the server to invalidate the current session, logging us off.
///
/// On success the body is `<noerror/>`.
pub async fn logoff(
    client: &Client,
    service_url: &Url,
) -> Result<RawResponse, EndpointError> {
    let path = super::url("auth", "logoff", None);

    super::get(client, service_url, &path, &[], BodyEncoding::Text).await
}
