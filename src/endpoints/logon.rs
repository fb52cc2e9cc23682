use crate::{
    credentials::{build_credentials_xml, CredentialsError},
    AccountInfo, XmlError,
};
use reqwest::{Client, Error as ReqwestError};
use url::Url;

use super::{BodyEncoding, RawResponse};

/// Log on to CMS, creating a session which later requests reuse via cookies.
///
/// The server answers rejected credentials with a `200 OK` and an error
/// document, so a successful return doesn't mean we are logged in. Check
/// [`LogonResponse::is_authenticated()`].
pub async fn logon(
    client: &Client,
    service_url: &Url,
    namespace: &str,
    username: &str,
    password: &str,
) -> Result<LogonResponse, LogonError> {
    let xml_data = build_credentials_xml(namespace, username, password)?;
    let url = super::full_url(service_url, &super::url("auth", "logon", None));

    // the payload contains the password, so it never gets logged
    log::debug!("Sending a logon request to {} as {}", url, username);
    let response = client
        .get(&url)
        .query(&[("xmlData", xml_data.as_str())])
        .send()
        .await?
        .error_for_status()?;

    log::trace!("Headers: {:#?}", response.headers());

    let raw = super::read_body(response, BodyEncoding::Text).await?;
    let account = AccountInfo::parse(&raw.body)?;
    log::trace!("Parsed response: {:#?}", account);

    interpret_response(&account, username);

    Ok(LogonResponse { raw, account })
}

fn interpret_response(account: &AccountInfo, username: &str) {
    match account.display_name {
        Some(ref name) if account.is_authenticated() => {
            log::info!("Logged on as {}", name)
        },
        _ if account.is_authenticated() => {
            log::info!("Logged on as {}", username)
        },
        _ => log::warn!(
            "The logon request for {} didn't return any account information",
            username
        ),
    }
}

/// The server's reply to a logon request.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct LogonResponse {
    pub raw: RawResponse,
    /// The account details read from the body.
    pub account: AccountInfo,
}

impl LogonResponse {
    /// Did the server accept our credentials?
    pub fn is_authenticated(&self) -> bool { self.account.is_authenticated() }
}

/// Possible errors that may be returned by [`logon()`].
#[derive(Debug, thiserror::Error)]
pub enum LogonError {
    /// The HTTP client encountered an error.
    #[error("Unable to send the logon request")]
    HttpClient(#[from] ReqwestError),
    /// Unable to create the `xmlData` payload.
    #[error("Unable to build the credentials")]
    Credentials(#[from] CredentialsError),
    /// Unable to parse the logon response.
    #[error("Unable to parse the logon response")]
    ResponseParse(#[from] XmlError),
}
