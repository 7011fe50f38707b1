//! Contact information singleton

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Society office contact details shown on the public site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub office_address: String,
    pub office_phone: String,
    pub office_email: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub map_url: String,
    pub office_hours: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_fills_defaults() {
        let contact: ContactInfo =
            serde_json::from_str(r#"{"officePhone":"+91 22 1234 5678"}"#).unwrap();
        assert_eq!(contact.office_phone, "+91 22 1234 5678");
        assert_eq!(contact.office_email, "");
        assert!(contact.updated_at.is_none());
    }
}
