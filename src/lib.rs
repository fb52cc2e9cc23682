//! An unofficial interface to the IBM Cognos Mashup Service (CMS) REST API.

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod account_info;
mod credentials;
pub mod endpoints;
mod options;
mod session;

pub use account_info::{AccountInfo, TagNormalizer, XmlError};
pub use credentials::{build_credentials_xml, CredentialsError};
pub use options::ClientOptions;
pub use session::{Session, SessionError};

/// The default user agent to use when communicating with the CMS server.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));
