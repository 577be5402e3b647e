use url::form_urlencoded;

use crate::config::RoutesConfig;

/// Where a guard sends the user, and where they were trying to go.
///
/// `return_to` is only set on guard-triggered redirects into an
/// authentication view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub to: String,
    pub return_to: Option<String>,
}

impl RedirectTarget {
    pub fn to(path: impl Into<String>) -> Self {
        RedirectTarget {
            to: path.into(),
            return_to: None,
        }
    }

    pub fn with_return_to(path: impl Into<String>, return_to: impl Into<String>) -> Self {
        RedirectTarget {
            to: path.into(),
            return_to: Some(return_to.into()),
        }
    }

    /// The navigable URL. The return-to value travels as an opaque, encoded
    /// query value under `param`, never inside the path.
    pub fn href(&self, param: &str) -> String {
        match &self.return_to {
            Some(return_to) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(param, return_to)
                    .finish();
                format!("{}?{}", self.to, query)
            }
            None => self.to.clone(),
        }
    }
}

/// Path component of a location, without query or fragment.
pub fn path_of(location: &str) -> &str {
    let end = location.find(|c: char| c == '?' || c == '#').unwrap_or(location.len());
    &location[..end]
}

/// Decoded value of `param` in the location's query string, if present.
pub fn return_to_of(location: &str, param: &str) -> Option<String> {
    let (_, rest) = location.split_once('?')?;
    let query = rest.split('#').next().unwrap_or("");
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
}

/// A return-to value is only followed when it stays on this origin.
///
/// Browsers drop tab and newline characters while parsing a URL, so `/\t/x`
/// would be read as `//x`. Control characters are rejected outright.
pub fn is_safe_return_to(return_to: &str) -> bool {
    return_to.starts_with('/')
        && !return_to.starts_with("//")
        && !return_to.contains('\\')
        && !return_to.chars().any(char::is_control)
}

impl RoutesConfig {
    /// True for views that exist to establish a session.
    pub fn is_auth_view(&self, location: &str) -> bool {
        let path = path_of(location);
        path == self.login_view || path == self.register_view
    }

    /// Send the user to the login view, remembering `location`.
    ///
    /// When `location` is already an authentication view nothing is attached,
    /// so return-to values never nest.
    pub fn login_redirect(&self, location: &str) -> RedirectTarget {
        if self.is_auth_view(location) {
            RedirectTarget::to(&self.login_view)
        } else {
            RedirectTarget::with_return_to(&self.login_view, location)
        }
    }

    /// Where to go once a session exists: the return-to value when it is a
    /// same-origin path, the landing view otherwise.
    pub fn post_login_destination(&self, return_to: Option<&str>) -> String {
        match return_to {
            Some(target) if is_safe_return_to(target) && !self.is_auth_view(target) => {
                target.to_string()
            }
            _ => self.landing_view.clone(),
        }
    }

    pub fn href(&self, target: &RedirectTarget) -> String {
        target.href(&self.return_to_param)
    }
}
