//! Settings routes - configuration, companies and webhook endpoint

pub mod api;

pub use api::{api_companies, api_set_webhook, api_settings, WebhookSetting, WebhookUpdate};
