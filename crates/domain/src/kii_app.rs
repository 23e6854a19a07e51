//! Application identity — the app id/key pair and the site hosting it.

use crate::error::ArgumentError;

/// Cloud region hosting an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Site {
    Us,
    Jp,
    Cn3,
    Sg,
    Eu,
    /// A custom base URL, e.g. a private deployment or a test server.
    Custom(String),
}

impl Site {
    /// Base URL of the site, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self {
            Self::Us => "https://api.kii.com",
            Self::Jp => "https://api-jp.kii.com",
            Self::Cn3 => "https://api-cn3.kii.com",
            Self::Sg => "https://api-sg.kii.com",
            Self::Eu => "https://api-eu.kii.com",
            Self::Custom(url) => url.trim_end_matches('/'),
        }
    }
}

impl std::str::FromStr for Site {
    type Err = ArgumentError;

    /// Parse a region name (`us`, `jp`, …) or an `http(s)://` URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "us" => Ok(Self::Us),
            "jp" => Ok(Self::Jp),
            "cn3" => Ok(Self::Cn3),
            "sg" => Ok(Self::Sg),
            "eu" => Ok(Self::Eu),
            _ if s.starts_with("http://") || s.starts_with("https://") => {
                Ok(Self::Custom(s.to_string()))
            }
            _ => Err(ArgumentError::Invalid {
                field: "site",
                reason: format!("unknown site `{s}`"),
            }),
        }
    }
}

/// An application registered on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KiiApp {
    app_id: String,
    app_key: String,
    site: Site,
}

impl KiiApp {
    /// Create an application handle.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] when `app_id` or `app_key` is empty.
    pub fn new(
        app_id: impl Into<String>,
        app_key: impl Into<String>,
        site: Site,
    ) -> Result<Self, ArgumentError> {
        let app_id = app_id.into();
        let app_key = app_key.into();
        if app_id.is_empty() {
            return Err(ArgumentError::Missing("app_id"));
        }
        if app_key.is_empty() {
            return Err(ArgumentError::Missing("app_key"));
        }
        Ok(Self {
            app_id,
            app_key,
            site,
        })
    }

    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    #[must_use]
    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    #[must_use]
    pub fn site(&self) -> &Site {
        &self.site
    }

    /// `<site>/thing-if/apps/<appID>`
    #[must_use]
    pub fn thing_if_base_url(&self) -> String {
        format!("{}/thing-if/apps/{}", self.site.base_url(), self.app_id)
    }

    /// `<site>/api/apps/<appID>`
    #[must_use]
    pub fn kii_cloud_base_url(&self) -> String {
        format!("{}/api/apps/{}", self.site.base_url(), self.app_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_thing_if_and_cloud_urls() {
        let app = KiiApp::new("abcd1234", "key", Site::Jp).unwrap();
        assert_eq!(
            app.thing_if_base_url(),
            "https://api-jp.kii.com/thing-if/apps/abcd1234"
        );
        assert_eq!(
            app.kii_cloud_base_url(),
            "https://api-jp.kii.com/api/apps/abcd1234"
        );
    }

    #[test]
    fn should_strip_trailing_slash_from_custom_site() {
        let app = KiiApp::new("a", "k", Site::Custom("http://127.0.0.1:8080/".into())).unwrap();
        assert_eq!(app.thing_if_base_url(), "http://127.0.0.1:8080/thing-if/apps/a");
    }

    #[test]
    fn should_return_argument_error_when_app_id_is_empty() {
        assert_eq!(
            KiiApp::new("", "key", Site::Us),
            Err(ArgumentError::Missing("app_id"))
        );
    }

    #[test]
    fn should_return_argument_error_when_app_key_is_empty() {
        assert_eq!(
            KiiApp::new("id", "", Site::Us),
            Err(ArgumentError::Missing("app_key"))
        );
    }

    #[test]
    fn should_parse_site_names_and_urls() {
        assert_eq!("US".parse::<Site>().unwrap(), Site::Us);
        assert_eq!("cn3".parse::<Site>().unwrap(), Site::Cn3);
        assert_eq!(
            "https://example.com".parse::<Site>().unwrap(),
            Site::Custom("https://example.com".into())
        );
        assert!("mars".parse::<Site>().is_err());
    }
}
