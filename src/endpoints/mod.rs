//! The CMS REST API's endpoints.
//!
//! Every function here sends exactly one `GET` request through the provided
//! [`Client`]. Session tracking is done with cookies, so the client should be
//! created with a cookie store (see [`crate::ClientOptions`]).

mod export;
mod logoff;
mod logon;
mod prompt_description;
mod report_data;
mod reports;

pub use export::{get_export_by_id, SPREADSHEET_ML};
pub use logoff::logoff;
pub use logon::{logon, LogonError, LogonResponse};
pub use prompt_description::get_prompt_description_by_id;
pub use report_data::get_report_by_id;
pub use reports::get_reports;

use reqwest::{header::HeaderMap, Client, Error, Response, StatusCode};
use url::Url;

/// Typical endpoint errors.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// The HTTP client encountered an error, or the server replied with a
    /// non-2xx status code.
    #[error("Unable to send the request")]
    HttpClient(#[from] Error),
}

/// The response to a request, as returned by the server.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Create the path to a resource, relative to the service URL.
///
/// ```rust
/// assert_eq!(
///     cognos_mashup::endpoints::url("reportData", "report", Some("i4E1F")),
///     "/rds/reportData/report/i4E1F",
/// );
/// assert_eq!(
///     cognos_mashup::endpoints::url("auth", "logon", None),
///     "/rds/auth/logon",
/// );
/// ```
pub fn url(
    resource_type: &str,
    source_type: &str,
    source_id: Option<&str>,
) -> String {
    let mut parts = vec!["", "rds", resource_type, source_type];

    if let Some(id) = source_id.filter(|id| !id.is_empty()) {
        parts.push(id);
    }

    parts.join("/")
}

fn full_url(service_url: &Url, path: &str) -> String {
    format!("{}{}", service_url.as_str().trim_end_matches('/'), path)
}

/// How the response body should be turned into a string.
#[derive(Debug, Copy, Clone, PartialEq)]
enum BodyEncoding {
    Text,
    /// The body is binary, so hand it back base64-encoded.
    Base64,
}

async fn send(
    client: &Client,
    service_url: &Url,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Response, Error> {
    let url = full_url(service_url, path);

    log::debug!("Sending a request to {}", url);
    log::trace!("Query: {:#?}", query);
    let response = client
        .get(&url)
        .query(query)
        .send()
        .await?
        .error_for_status()?;

    log::trace!("Headers: {:#?}", response.headers());

    Ok(response)
}

async fn read_body(
    response: Response,
    encoding: BodyEncoding,
) -> Result<RawResponse, Error> {
    let status = response.status();
    let headers = response.headers().clone();

    let body = match encoding {
        BodyEncoding::Text => response.text().await?,
        BodyEncoding::Base64 => {
            use base64::Engine;

            let bytes = response.bytes().await?;
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        },
    };
    log::trace!("Response: {}", body);

    Ok(RawResponse {
        status,
        headers,
        body,
    })
}

/// Send a request for a report resource.
async fn get(
    client: &Client,
    service_url: &Url,
    path: &str,
    query: &[(&str, &str)],
    encoding: BodyEncoding,
) -> Result<RawResponse, EndpointError> {
    let response = send(client, service_url, path, query).await?;
    let mut raw = read_body(response, encoding).await?;

    if encoding == BodyEncoding::Text && wants_csv(query) {
        raw.body = replace_invalid_characters(raw.body);
    }

    Ok(raw)
}

fn wants_csv(query: &[(&str, &str)]) -> bool {
    query
        .iter()
        .any(|&(key, value)| key == "fmt" && value == export::CSV)
}

/// CMS sometimes produces CSV which isn't valid UTF-8. Those bytes are decoded
/// as U+FFFD, which we swap for a null character.
fn replace_invalid_characters(body: String) -> String {
    if body.contains(char::REPLACEMENT_CHARACTER) {
        body.replace(char::REPLACEMENT_CHARACTER, "\u{0}")
    } else {
        body
    }
}
