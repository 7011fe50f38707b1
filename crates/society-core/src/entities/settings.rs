//! Site settings singleton

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocietyProfile {
    pub name: String,
    pub address: String,
    pub registration_number: String,
    pub email: String,
    pub phone: String,
}

impl Default for SocietyProfile {
    fn default() -> Self {
        Self {
            name: "Residential Society".to_string(),
            address: String::new(),
            registration_number: String::new(),
            email: String::new(),
            phone: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Branding {
    pub primary_color: String,
    pub logo_path: String,
    pub tagline: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            primary_color: "#1e40af".to_string(),
            logo_path: String::new(),
            tagline: String::new(),
        }
    }
}

/// Public site sections that can be switched off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Features {
    pub show_gallery: bool,
    pub show_events: bool,
    pub show_documents: bool,
    pub show_committee: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            show_gallery: true,
            show_events: true,
            show_documents: true,
            show_committee: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemSettings {
    pub maintenance_mode: bool,
    pub items_per_page: u32,
    pub timezone: String,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            maintenance_mode: false,
            items_per_page: 10,
            timezone: "Asia/Kolkata".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub society: SocietyProfile,
    pub branding: Branding,
    pub features: Features,
    pub system: SystemSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// The subset of settings visible without a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSettings {
    pub society: SocietyProfile,
    pub branding: Branding,
    pub features: Features,
}

impl Settings {
    pub fn public_view(&self) -> PublicSettings {
        PublicSettings {
            society: self.society.clone(),
            branding: self.branding.clone(),
            features: self.features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_use_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"society":{"name":"Green Park CHS"}}"#).unwrap();
        assert_eq!(settings.society.name, "Green Park CHS");
        assert!(settings.features.show_gallery);
        assert_eq!(settings.system.items_per_page, 10);
    }

    #[test]
    fn test_public_view_hides_system_section() {
        let json = serde_json::to_value(Settings::default().public_view()).unwrap();
        assert!(json.get("system").is_none());
        assert!(json.get("society").is_some());
        assert_eq!(json["features"]["showEvents"], true);
    }
}
