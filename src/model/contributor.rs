//! Contributor: an account shown in the contributor strip.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contributor {
    /// GitHub login.
    pub name: String,

    /// Avatar image URL.
    pub image: String,

    /// Profile URL.
    pub url: String,
}
