//! Credential persistence

pub mod credential_file;
pub mod private_file;

pub use credential_file::JsonCredentialFile;
