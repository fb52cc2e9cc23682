//! The `xmlData` document sent when logging on.

use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use serde_derive::Deserialize;

/// The static credential document, with an empty value slot for each
/// credential the server expects.
const TEMPLATE: &str = include_str!("credentials.json");

const CAM_NAMESPACE: &str = "CAMNamespace";
const CAM_USERNAME: &str = "CAMUsername";
const CAM_PASSWORD: &str = "CAMPassword";

/// Fill the credential template with the provided values and serialize it
/// to a compact XML string (no declaration, no indentation).
///
/// The template is loaded fresh on every call so the output only ever depends
/// on the arguments.
pub fn build_credentials_xml(
    namespace: &str,
    username: &str,
    password: &str,
) -> Result<String, CredentialsError> {
    let mut doc: TemplateDocument = serde_json::from_str(TEMPLATE)?;
    let elements = &mut doc.credentials.credential_elements;

    set_value(elements, CAM_NAMESPACE, namespace)?;
    set_value(elements, CAM_USERNAME, username)?;
    set_value(elements, CAM_PASSWORD, password)?;

    doc.credentials.to_xml()
}

fn set_value(
    elements: &mut [CredentialElement],
    name: &'static str,
    value: &str,
) -> Result<(), CredentialsError> {
    let element = elements
        .iter_mut()
        .find(|element| element.name == name)
        .ok_or(CredentialsError::MissingElement { name })?;

    element.value.actual_value = value.to_string();

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct TemplateDocument {
    credentials: Credentials,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Credentials {
    credential_elements: Vec<CredentialElement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct CredentialElement {
    name: String,
    value: CredentialValue,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialValue {
    actual_value: String,
}

impl Credentials {
    fn to_xml(&self) -> Result<String, CredentialsError> {
        let mut writer = Writer::new(Vec::new());

        writer.write_event(Event::Start(BytesStart::new("credentials")))?;

        for element in &self.credential_elements {
            writer.write_event(Event::Start(BytesStart::new(
                "credentialElements",
            )))?;
            write_text_element(&mut writer, "name", &element.name)?;
            writer.write_event(Event::Start(BytesStart::new("value")))?;
            write_text_element(
                &mut writer,
                "actualValue",
                &element.value.actual_value,
            )?;
            writer.write_event(Event::End(BytesEnd::new("value")))?;
            writer
                .write_event(Event::End(BytesEnd::new("credentialElements")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("credentials")))?;

        String::from_utf8(writer.into_inner()).map_err(CredentialsError::from)
    }
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;

    Ok(())
}

/// Errors that may occur while building the credential payload.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("The credential template is malformed")]
    Template(#[from] serde_json::Error),
    #[error("The credential template has no \"{}\" element", name)]
    MissingElement { name: &'static str },
    #[error("Unable to write the credential XML")]
    Write(#[from] quick_xml::Error),
    #[error("The credential XML wasn't valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
