use std::fmt;

/// Email wrapper that hides the local part in Debug/Display output.
///
/// Lock rows carry the holder's contact address; log lines must not. Wrap
/// the address before handing it to a tracing macro. Serialization is left
/// untouched so API responses still see the real value.
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MaskedEmail(String);

impl MaskedEmail {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    fn masked(&self) -> String {
        match self.0.split_once('@') {
            Some((local, domain)) => {
                let head = local.chars().next().unwrap_or('*');
                format!("{}***@{}", head, domain)
            }
            None => "***".to_string(),
        }
    }
}

impl fmt::Debug for MaskedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl fmt::Display for MaskedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<&str> for MaskedEmail {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_local_part() {
        let email = MaskedEmail::new("alice@example.com");
        assert_eq!(format!("{:?}", email), "a***@example.com");
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn malformed_address_is_fully_masked() {
        let email = MaskedEmail::new("not-an-email");
        assert_eq!(email.to_string(), "***");
    }
}
