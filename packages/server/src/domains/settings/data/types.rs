use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};

use crate::common::utils::validation::{optional_text, optional_url, required_text};
use crate::common::{DirectoryError, DirectoryResult};
use crate::domains::settings::models::{SiteSettings, SiteSettingsDraft};

const CODE_SNIPPET_MAX_LEN: usize = 10_000;

#[derive(Debug, Clone, GraphQLObject)]
pub struct SiteSettingsData {
    pub site_name: String,
    pub site_description: Option<String>,
    pub site_logo: Option<String>,
    pub favicon: Option<String>,
    pub google_analytics: Option<String>,
    pub custom_head_code: Option<String>,
    pub custom_footer_code: Option<String>,
    pub contact_email: Option<String>,
    pub social_facebook: Option<String>,
    pub social_twitter: Option<String>,
    pub social_instagram: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<SiteSettings> for SiteSettingsData {
    fn from(s: SiteSettings) -> Self {
        Self {
            site_name: s.site_name,
            site_description: s.site_description,
            site_logo: s.site_logo,
            favicon: s.favicon,
            google_analytics: s.google_analytics,
            custom_head_code: s.custom_head_code,
            custom_footer_code: s.custom_footer_code,
            contact_email: s.contact_email,
            social_facebook: s.social_facebook,
            social_twitter: s.social_twitter,
            social_instagram: s.social_instagram,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Clone, GraphQLInputObject)]
pub struct SiteSettingsInput {
    pub site_name: String,
    pub site_description: Option<String>,
    pub site_logo: Option<String>,
    pub favicon: Option<String>,
    /// Measurement id, e.g. "G-XXXXXXX"
    pub google_analytics: Option<String>,
    pub custom_head_code: Option<String>,
    pub custom_footer_code: Option<String>,
    pub contact_email: Option<String>,
    pub social_facebook: Option<String>,
    pub social_twitter: Option<String>,
    pub social_instagram: Option<String>,
}

fn contact_email(value: Option<&str>) -> DirectoryResult<Option<String>> {
    let email = optional_text("contact_email", value, 254)?;
    if let Some(email) = &email {
        let valid = email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.ends_with('.'))
            .unwrap_or(false);
        if !valid || email.contains(char::is_whitespace) {
            return Err(DirectoryError::validation(
                "contact_email",
                "must be a valid email address",
            ));
        }
    }
    Ok(email)
}

impl SiteSettingsInput {
    pub fn validate(&self) -> DirectoryResult<SiteSettingsDraft> {
        Ok(SiteSettingsDraft {
            site_name: required_text("site_name", &self.site_name, 2, 100)?,
            site_description: optional_text(
                "site_description",
                self.site_description.as_deref(),
                500,
            )?,
            site_logo: optional_url("site_logo", self.site_logo.as_deref())?,
            favicon: optional_url("favicon", self.favicon.as_deref())?,
            google_analytics: optional_text(
                "google_analytics",
                self.google_analytics.as_deref(),
                50,
            )?,
            custom_head_code: optional_text(
                "custom_head_code",
                self.custom_head_code.as_deref(),
                CODE_SNIPPET_MAX_LEN,
            )?,
            custom_footer_code: optional_text(
                "custom_footer_code",
                self.custom_footer_code.as_deref(),
                CODE_SNIPPET_MAX_LEN,
            )?,
            contact_email: contact_email(self.contact_email.as_deref())?,
            social_facebook: optional_url("social_facebook", self.social_facebook.as_deref())?,
            social_twitter: optional_url("social_twitter", self.social_twitter.as_deref())?,
            social_instagram: optional_url("social_instagram", self.social_instagram.as_deref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> SiteSettingsInput {
        SiteSettingsInput {
            site_name: "Groups Hub".into(),
            site_description: None,
            site_logo: Some("https://cdn.example.com/logo.png".into()),
            favicon: None,
            google_analytics: Some("G-123".into()),
            custom_head_code: None,
            custom_footer_code: None,
            contact_email: Some("hello@example.com".into()),
            social_facebook: None,
            social_twitter: Some("".into()),
            social_instagram: None,
        }
    }

    #[test]
    fn valid_input_passes() {
        let draft = input().validate().unwrap();
        assert_eq!(draft.site_name, "Groups Hub");
        assert_eq!(draft.social_twitter, None);
    }

    #[test]
    fn site_name_needs_two_chars() {
        let settings = SiteSettingsInput {
            site_name: "G".into(),
            ..input()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn bad_email_is_rejected() {
        for email in ["nobody", "@example.com", "a@b", "a b@example.com"] {
            let settings = SiteSettingsInput {
                contact_email: Some(email.into()),
                ..input()
            };
            let err = settings.validate().unwrap_err();
            assert!(matches!(
                err,
                DirectoryError::Validation {
                    field: "contact_email",
                    ..
                }
            ));
        }
    }

    #[test]
    fn logo_must_be_a_url() {
        let settings = SiteSettingsInput {
            site_logo: Some("logo.png".into()),
            ..input()
        };
        assert!(settings.validate().is_err());
    }
}
