use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Views the route guards redirect between.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct RoutesConfig {
    #[serde(default = "default_login_view")]
    pub login_view: String,
    #[serde(default = "default_register_view")]
    pub register_view: String,
    /// Where an already-authenticated user is sent from an authentication view.
    #[serde(default = "default_landing_view")]
    pub landing_view: String,
    /// Query parameter carrying the masked return-to URL.
    #[serde(default = "default_return_to_param")]
    pub return_to_param: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        RoutesConfig {
            login_view: default_login_view(),
            register_view: default_register_view(),
            landing_view: default_landing_view(),
            return_to_param: default_return_to_param(),
        }
    }
}

fn default_login_view() -> String {
    "/login".to_string()
}

fn default_register_view() -> String {
    "/register".to_string()
}

fn default_landing_view() -> String {
    "/dashboard".to_string()
}

fn default_return_to_param() -> String {
    "redirect".to_string()
}
