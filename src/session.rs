use crate::{
    endpoints::{self, EndpointError, LogonError, LogonResponse, RawResponse},
    AccountInfo, ClientOptions,
};
use reqwest::Client;
use std::fmt::{self, Debug, Formatter};
use url::Url;

/// A connection to a Cognos Mashup Service.
///
/// CMS keeps track of who is logged in using cookies, so every request made
/// through a [`Session`] shares the same cookie store. Call
/// [`Session::logon()`] before requesting reports.
#[derive(Clone)]
pub struct Session {
    client: Client,
    service_url: Url,
    namespace: String,
    username: String,
    password: String,
    account: Option<AccountInfo>,
}

impl Session {
    /// Create a new session using the default [`ClientOptions`].
    pub fn new(
        service_url: &str,
        namespace: &str,
        username: &str,
        password: &str,
    ) -> Result<Session, SessionError> {
        Session::with_options(
            service_url,
            namespace,
            username,
            password,
            &ClientOptions::default(),
        )
    }

    pub fn with_options(
        service_url: &str,
        namespace: &str,
        username: &str,
        password: &str,
        options: &ClientOptions,
    ) -> Result<Session, SessionError> {
        let service_url = Url::parse(service_url)?;
        let client = options.build_client()?;

        Ok(Session {
            client,
            service_url,
            namespace: namespace.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            account: None,
        })
    }

    pub fn service_url(&self) -> &Url { &self.service_url }

    pub fn username(&self) -> &str { &self.username }

    /// Change the password used by the next [`Session::logon()`].
    pub fn set_password(&mut self, password: &str) {
        self.password = password.to_string();
    }

    /// The account we are logged on as, if any.
    pub fn account(&self) -> Option<&AccountInfo> { self.account.as_ref() }

    pub fn is_logged_in(&self) -> bool { self.account.is_some() }

    /// Log on to the server.
    ///
    /// The account details are only remembered when the server accepted our
    /// credentials. Any previous account is forgotten, even if this logon
    /// fails.
    pub async fn logon(&mut self) -> Result<LogonResponse, LogonError> {
        self.account = None;

        let response = endpoints::logon(
            &self.client,
            &self.service_url,
            &self.namespace,
            &self.username,
            &self.password,
        )
        .await?;

        self.account = if response.is_authenticated() {
            Some(response.account.clone())
        } else {
            None
        };

        Ok(response)
    }

    /// Expire the current session.
    pub async fn logoff(&mut self) -> Result<RawResponse, EndpointError> {
        let response =
            endpoints::logoff(&self.client, &self.service_url).await?;

        if let Some(account) = self.account.take() {
            log::info!(
                "Logged off {}",
                account.display_name.as_deref().unwrap_or(&self.username)
            );
        }

        Ok(response)
    }

    pub async fn get_reports(
        &self,
        folder_path: &str,
    ) -> Result<RawResponse, EndpointError> {
        endpoints::get_reports(&self.client, &self.service_url, folder_path)
            .await
    }

    pub async fn get_report_by_id(
        &self,
        source_id: &str,
        query: &[(&str, &str)],
    ) -> Result<RawResponse, EndpointError> {
        endpoints::get_report_by_id(
            &self.client,
            &self.service_url,
            source_id,
            query,
        )
        .await
    }

    pub async fn get_export_by_id(
        &self,
        source_id: &str,
        query: &[(&str, &str)],
        output_format: &str,
    ) -> Result<RawResponse, EndpointError> {
        endpoints::get_export_by_id(
            &self.client,
            &self.service_url,
            source_id,
            query,
            output_format,
        )
        .await
    }

    pub async fn get_prompt_description_by_id(
        &self,
        source_id: &str,
        query: &[(&str, &str)],
    ) -> Result<RawResponse, EndpointError> {
        endpoints::get_prompt_description_by_id(
            &self.client,
            &self.service_url,
            source_id,
            query,
        )
        .await
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("service_url", &self.service_url.as_str())
            .field("namespace", &self.namespace)
            .field("username", &self.username)
            .field("account", &self.account)
            .finish()
    }
}

/// Errors that may occur while creating a [`Session`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("The service URL is invalid")]
    InvalidServiceUrl(#[from] url::ParseError),
    #[error("Unable to create the HTTP client")]
    HttpClient(#[from] reqwest::Error),
}
