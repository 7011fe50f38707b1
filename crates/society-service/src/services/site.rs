//! Contact info and site settings
//!
//! Both are single JSON documents updated by deep merge.

use serde_json::{Map, Value};
use society_core::{
    AdminUser, AuditAction, AuditLogEntry, ContactInfo, PublicSettings, Settings,
};
use tracing::{info, instrument};

use super::audit::AuditService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const ITEMS_PER_PAGE_RANGE: std::ops::RangeInclusive<u64> = 1..=100;

/// Contact and settings service
pub struct SiteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SiteService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn contact(&self) -> ServiceResult<ContactInfo> {
        Ok(self.ctx.contact().get().await?)
    }

    #[instrument(skip(self, actor, patch), fields(actor = %actor.email))]
    pub async fn update_contact(
        &self,
        actor: &AdminUser,
        patch: Map<String, Value>,
    ) -> ServiceResult<ContactInfo> {
        let patch = strip_stamps(patch);
        let contact = self.ctx.contact().update(&patch, &actor.email).await?;
        info!("Contact info updated");

        self.audit(actor, AuditAction::ContactUpdate, &patch).await;
        Ok(contact)
    }

    pub async fn settings(&self) -> ServiceResult<Settings> {
        Ok(self.ctx.settings().get().await?)
    }

    /// Settings without the `system` section
    pub async fn public_settings(&self) -> ServiceResult<PublicSettings> {
        Ok(self.settings().await?.public_view())
    }

    /// Section-wise partial update: `{ "branding": { "tagline": "..." } }`
    /// leaves every other setting alone
    #[instrument(skip(self, actor, patch), fields(actor = %actor.email))]
    pub async fn update_settings(
        &self,
        actor: &AdminUser,
        patch: Map<String, Value>,
    ) -> ServiceResult<Settings> {
        let patch = strip_stamps(patch);
        validate_settings_patch(&patch)?;

        let settings = self.ctx.settings().update(&patch, &actor.email).await?;
        info!("Settings updated");

        self.audit(actor, AuditAction::SettingsUpdate, &patch).await;
        Ok(settings)
    }

    async fn audit(&self, actor: &AdminUser, action: AuditAction, patch: &Map<String, Value>) {
        let sections: Vec<Value> = patch.keys().cloned().map(Value::String).collect();
        let entry =
            AuditLogEntry::new(actor, action, None).with_detail("fields", Value::Array(sections));
        AuditService::new(self.ctx).record(entry).await;
    }
}

/// `updatedAt` / `updatedBy` are stamped by the store only
fn strip_stamps(mut patch: Map<String, Value>) -> Map<String, Value> {
    patch.remove("updatedAt");
    patch.remove("updatedBy");
    patch
}

fn validate_settings_patch(patch: &Map<String, Value>) -> ServiceResult<()> {
    let items_per_page = patch
        .get("system")
        .and_then(|system| system.get("itemsPerPage"));

    if let Some(value) = items_per_page {
        let in_range = value
            .as_u64()
            .is_some_and(|n| ITEMS_PER_PAGE_RANGE.contains(&n));
        if !in_range {
            return Err(ServiceError::validation(
                "Items per page must be between 1 and 100",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_items_per_page_bounds() {
        assert!(validate_settings_patch(&object(json!({ "system": { "itemsPerPage": 20 } }))).is_ok());
        assert!(validate_settings_patch(&object(json!({ "system": { "itemsPerPage": 0 } }))).is_err());
        assert!(validate_settings_patch(&object(json!({ "system": { "itemsPerPage": "ten" } }))).is_err());
        assert!(validate_settings_patch(&object(json!({ "branding": { "tagline": "Home" } }))).is_ok());
    }

    #[test]
    fn test_stamps_are_stripped() {
        let patch = strip_stamps(object(json!({
            "officePhone": "022-555",
            "updatedBy": "someone@else",
            "updatedAt": "1999-01-01T00:00:00Z"
        })));
        assert_eq!(patch.len(), 1);
        assert!(patch.contains_key("officePhone"));
    }
}
