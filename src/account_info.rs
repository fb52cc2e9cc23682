//! Reading the account details out of a logon response.

use quick_xml::{events::Event, Reader};

/// The element the server wraps a successful logon's account details in.
const ACCOUNT_INFO: &str = "accountInfo";
const ACCOUNT_ID: &str = "accountID";
const DISPLAY_NAME: &str = "displayName";

/// Who the server says we are logged in as.
///
/// Both fields are `None` when the server rejected the credentials. It still
/// replies with a `200 OK` in that case, just with an error-shaped body.
#[derive(Debug, Default, Clone, PartialEq)]
#[non_exhaustive]
pub struct AccountInfo {
    pub account_id: Option<String>,
    pub display_name: Option<String>,
}

impl AccountInfo {
    /// Parse a logon response using the default [`TagNormalizer`].
    pub fn parse(body: &str) -> Result<AccountInfo, XmlError> {
        AccountInfo::parse_with(body, &TagNormalizer::default())
    }

    /// Parse a logon response, normalizing every element name with
    /// `normalizer` before it is matched.
    pub fn parse_with(
        body: &str,
        normalizer: &TagNormalizer,
    ) -> Result<AccountInfo, XmlError> {
        // text inside the fields is kept verbatim, whitespace between
        // elements is skipped below
        let mut reader = Reader::from_str(body);

        let mut info = AccountInfo::default();
        let mut stack: Vec<String> = Vec::new();
        let mut in_account_info = false;
        // the field we're currently collecting text for, if any
        let mut current: Option<(Field, String)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let qname = start.name();
                    let raw = reader.decoder().decode(qname.as_ref())?;
                    let name = normalizer.normalize(&raw).to_string();

                    if stack.is_empty() {
                        in_account_info = name == ACCOUNT_INFO;
                    } else if in_account_info && stack.len() == 1 {
                        current = Field::from_tag(&name)
                            .filter(|field| info.get(*field).is_none())
                            .map(|field| (field, String::new()));
                    }

                    stack.push(name);
                },
                Event::Empty(empty) => {
                    let qname = empty.name();
                    let raw = reader.decoder().decode(qname.as_ref())?;
                    let name = normalizer.normalize(&raw);

                    if in_account_info && stack.len() == 1 {
                        if let Some(field) = Field::from_tag(name) {
                            info.set_if_absent(field, String::new());
                        }
                    }
                },
                Event::End(_) => {
                    // quick-xml already rejects unbalanced closing tags
                    stack.pop();

                    if stack.len() == 1 {
                        if let Some((field, text)) = current.take() {
                            info.set_if_absent(field, text);
                        }
                    }
                },
                Event::Text(text) => {
                    let text = text.unescape()?;

                    if stack.is_empty() {
                        if text.trim().is_empty() {
                            continue;
                        }
                        return Err(XmlError::TextOutsideRoot);
                    }
                    if stack.len() == 2 {
                        if let Some((_, buffer)) = current.as_mut() {
                            buffer.push_str(&text);
                        }
                    }
                },
                Event::CData(data) => {
                    if stack.is_empty() {
                        return Err(XmlError::TextOutsideRoot);
                    }
                    if stack.len() == 2 {
                        if let Some((_, buffer)) = current.as_mut() {
                            let text = reader.decoder().decode(&data)?;
                            buffer.push_str(&text);
                        }
                    }
                },
                Event::Eof => break,
                // declarations, comments, processing instructions, etc.
                _ => {},
            }
        }

        if let Some(name) = stack.pop() {
            return Err(XmlError::UnclosedElement { name });
        }

        Ok(info)
    }

    /// Did the server accept our credentials?
    ///
    /// An empty or blank `accountID` doesn't count.
    pub fn is_authenticated(&self) -> bool {
        self.account_id
            .as_deref()
            .map_or(false, |id| !id.trim().is_empty())
    }

    fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::AccountId => self.account_id.as_deref(),
            Field::DisplayName => self.display_name.as_deref(),
        }
    }

    fn set_if_absent(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::AccountId => &mut self.account_id,
            Field::DisplayName => &mut self.display_name,
        };

        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Field {
    AccountId,
    DisplayName,
}

impl Field {
    fn from_tag(tag: &str) -> Option<Field> {
        match tag {
            ACCOUNT_ID => Some(Field::AccountId),
            DISPLAY_NAME => Some(Field::DisplayName),
            _ => None,
        }
    }
}

/// A rule for rewriting element names before they are matched.
///
/// CMS puts the logon response in the `auth:` namespace, so by default that
/// prefix is stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct TagNormalizer {
    prefixes: Vec<String>,
}

impl TagNormalizer {
    /// The namespace prefix used by the CMS authentication service.
    pub const AUTH_PREFIX: &'static str = "auth:";

    /// A normalizer which leaves names untouched.
    pub fn identity() -> Self {
        TagNormalizer {
            prefixes: Vec::new(),
        }
    }

    /// Also strip `prefix` from the start of element names.
    pub fn strip_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    pub fn normalize<'a>(&self, name: &'a str) -> &'a str {
        self.prefixes
            .iter()
            .find_map(|prefix| name.strip_prefix(prefix.as_str()))
            .unwrap_or(name)
    }
}

impl Default for TagNormalizer {
    fn default() -> Self {
        TagNormalizer::identity().strip_prefix(TagNormalizer::AUTH_PREFIX)
    }
}

/// The logon response couldn't be read as XML.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("Malformed XML")]
    Syntax(#[from] quick_xml::Error),
    #[error("Found text outside of the root element")]
    TextOutsideRoot,
    #[error("The \"{}\" element was never closed", name)]
    UnclosedElement { name: String },
}
