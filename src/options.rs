use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Settings used when creating the HTTP client a [`crate::Session`] talks
/// through.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    /// Remember cookies between requests. CMS tracks the logged in session
    /// with cookies, so turning this off means every request is anonymous.
    pub cookie_store: bool,
    /// Accept gzip-compressed responses.
    pub gzip: bool,
    pub max_redirects: usize,
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl ClientOptions {
    pub const DEFAULT_MAX_REDIRECTS: usize = 10;

    pub fn build_client(&self) -> Result<Client, reqwest::Error> {
        log::debug!("Creating a HTTP client with {:?}", self);

        let mut builder = Client::builder()
            .user_agent(self.user_agent.as_str())
            .cookie_store(self.cookie_store)
            .gzip(self.gzip)
            .redirect(Policy::limited(self.max_redirects));

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build()
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            cookie_store: true,
            gzip: true,
            max_redirects: ClientOptions::DEFAULT_MAX_REDIRECTS,
            user_agent: String::from(crate::DEFAULT_USER_AGENT),
            timeout: None,
        }
    }
}
