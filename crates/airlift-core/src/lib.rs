// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Airlift deployment tool.
//!
//! This crate provides the error type, the `ObjectStore` gateway trait, and
//! common types used throughout the Airlift workspace. The production S3
//! gateway, the revision registry, and the deployment pipeline all build on
//! the definitions here.

pub mod error;
pub mod store;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AirliftError;
pub use store::{ObjectHead, ObjectStore};
pub use types::ArchiveFormat;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airlift_error_has_all_variants() {
        // Verify all 4 error variants exist and can be constructed.
        let _config = AirliftError::Config("test".into());
        let _store = AirliftError::store("put failed", std::io::Error::other("test"));
        let _not_found = AirliftError::RevisionNotFound {
            revision: "abc123".into(),
        };
        let _packaging = AirliftError::Packaging {
            message: "test".into(),
            source: None,
        };
    }

    #[test]
    fn revision_not_found_names_the_revision() {
        let err = AirliftError::RevisionNotFound {
            revision: "abc123".into(),
        };
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn store_error_preserves_source() {
        use std::error::Error;
        let err = AirliftError::store("get failed", std::io::Error::other("timed out"));
        assert!(err.source().is_some());
        assert_eq!(err.source().unwrap().to_string(), "timed out");
    }

    #[test]
    fn object_store_trait_is_object_safe() {
        fn _assert(_: &dyn ObjectStore) {}
    }
}
