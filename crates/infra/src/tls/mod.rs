//! TLS material sources for the callback listener
//!
//! Wired into `CertificateResolver` in precedence order: a pair the user
//! installed in the config directory, a self-signed pair generated once and
//! kept there, and the pair compiled into the binary.

pub mod embedded;
pub mod installed;
pub mod self_signed;

pub use embedded::EmbeddedPair;
pub use installed::InstalledPair;
pub use self_signed::SelfSignedPair;
