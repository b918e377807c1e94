pub mod handle;
pub mod model;
pub mod route;
pub mod schema;
pub mod service;
pub mod submitter;
pub mod submitter_http;

pub use service::ComplaintService;
pub use submitter_http::WebhookSubmitter;
