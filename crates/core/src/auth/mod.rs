//! OAuth authorization: certificate resolution, code capture and exchange

pub mod certificates;
pub mod flow;
pub mod login;
pub mod ports;

pub use certificates::CertificateResolver;
pub use flow::{build_authorization_url, AuthorizationFlow, AuthorizationSession};
pub use login::{LoginOptions, LoginService};
