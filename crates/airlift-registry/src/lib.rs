// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Revision registry for the Airlift deployment tool.
//!
//! Given a bucket and a naming convention, lists known revisions with
//! timestamps and active flags, and performs the activate transition by
//! writing the active-pointer object. This crate is the functional core of
//! Airlift: the existence check before activation is the one
//! correctness-critical gate in the whole system.

pub mod naming;
pub mod pointer;
pub mod registry;

pub use naming::ArchiveNaming;
pub use pointer::ActivePointer;
pub use registry::{RevisionRegistry, RevisionRecord, DEPLOYER};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use airlift_core::AirliftError;
    use airlift_test_utils::{MockStore, StoreCall};

    use super::*;

    fn naming() -> ArchiveNaming {
        ArchiveNaming {
            prefix: None,
            deploy_archive: "dist".to_string(),
            archive_type: "tar.gz".to_string(),
            deploy_info: "fastboot-deploy-info.json".to_string(),
        }
    }

    fn registry(store: Arc<MockStore>) -> RevisionRegistry {
        RevisionRegistry::new(store, "b", naming())
    }

    fn seeded_store() -> Arc<MockStore> {
        // Three revisions with increasing timestamps, no pointer object.
        let store = MockStore::new();
        for (i, rev) in ["a1", "a2", "a3"].iter().enumerate() {
            store.seed_object(
                "b",
                &format!("dist-{rev}.tar.gz"),
                b"archive".as_slice(),
                Some(Utc.with_ymd_and_hms(2026, 1, 1 + i as u32, 0, 0, 0).unwrap()),
            );
        }
        Arc::new(store)
    }

    #[tokio::test]
    async fn listing_is_sorted_newest_first_with_no_active_revision() {
        let registry = registry(seeded_store());
        let records = registry.list_revisions().await.unwrap();

        let revisions: Vec<&str> = records.iter().map(|r| r.revision.as_str()).collect();
        assert_eq!(revisions, ["a3", "a2", "a1"]);
        assert!(records.iter().all(|r| !r.active));
        assert!(records.iter().all(|r| r.deployer == DEPLOYER));
    }

    #[tokio::test]
    async fn ties_keep_store_returned_order() {
        let store = MockStore::new();
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        for rev in ["b1", "b2", "b3"] {
            store.seed_object("b", &format!("dist-{rev}.tar.gz"), b"a".as_slice(), Some(t));
        }
        let registry = registry(Arc::new(store));

        let records = registry.list_revisions().await.unwrap();
        let revisions: Vec<&str> = records.iter().map(|r| r.revision.as_str()).collect();
        assert_eq!(revisions, ["b1", "b2", "b3"]);
    }

    #[tokio::test]
    async fn records_without_timestamps_sort_last() {
        let store = MockStore::new();
        store.seed_object("b", "dist-old.tar.gz", b"a".as_slice(), None);
        store.seed_object(
            "b",
            "dist-new.tar.gz",
            b"a".as_slice(),
            Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
        );
        let registry = registry(Arc::new(store));

        let records = registry.list_revisions().await.unwrap();
        let revisions: Vec<&str> = records.iter().map(|r| r.revision.as_str()).collect();
        assert_eq!(revisions, ["new", "old"]);
    }

    #[tokio::test]
    async fn malformed_object_names_are_filtered() {
        let store = seeded_store();
        store.seed_object("b", "dist-.tar.gz", b"a".as_slice(), None);
        store.seed_object("b", "dist-weird.zip", b"a".as_slice(), None);
        let registry = registry(store);

        let records = registry.list_revisions().await.unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| !r.revision.is_empty()));
    }

    #[tokio::test]
    async fn active_flag_follows_the_pointer() {
        let store = seeded_store();
        store.seed_object(
            "b",
            "fastboot-deploy-info.json",
            br#"{"bucket":"b","key":"dist-a2.tar.gz"}"#.as_slice(),
            None,
        );
        let registry = registry(store);

        let records = registry.list_revisions().await.unwrap();
        let active: Vec<&str> = records
            .iter()
            .filter(|r| r.active)
            .map(|r| r.revision.as_str())
            .collect();
        assert_eq!(active, ["a2"]);
    }

    #[tokio::test]
    async fn malformed_pointer_means_no_active_revision() {
        let store = seeded_store();
        store.seed_object("b", "fastboot-deploy-info.json", b"not json".as_slice(), None);
        let registry = registry(store);

        let records = registry.list_revisions().await.unwrap();
        assert!(records.iter().all(|r| !r.active));
    }

    #[tokio::test]
    async fn pointer_outside_naming_convention_means_no_active_revision() {
        let store = seeded_store();
        store.seed_object(
            "b",
            "fastboot-deploy-info.json",
            br#"{"bucket":"b","key":"something-else.zip"}"#.as_slice(),
            None,
        );
        let registry = registry(store);

        let records = registry.list_revisions().await.unwrap();
        assert!(records.iter().all(|r| !r.active));
    }

    #[tokio::test]
    async fn activating_a_known_revision_writes_the_pointer() {
        let store = seeded_store();
        let registry = registry(store.clone());

        registry.activate("a2").await.unwrap();

        let body = store
            .object("b", "fastboot-deploy-info.json")
            .expect("pointer should exist");
        assert_eq!(&body[..], br#"{"bucket":"b","key":"dist-a2.tar.gz"}"#);

        // A subsequent listing marks exactly a2 active.
        let records = registry.list_revisions().await.unwrap();
        for record in &records {
            assert_eq!(record.active, record.revision == "a2");
        }
    }

    #[tokio::test]
    async fn activating_an_unknown_revision_fails_without_writing() {
        let store = seeded_store();
        let registry = registry(store.clone());

        let err = registry.activate("a9").await.unwrap_err();
        assert!(
            matches!(err, AirliftError::RevisionNotFound { ref revision } if revision == "a9"),
            "{err:?}"
        );

        // The hard precondition: zero writes were issued.
        let puts = store
            .calls()
            .iter()
            .filter(|c| matches!(c, StoreCall::Put { .. }))
            .count();
        assert_eq!(puts, 0);
        assert!(store.object("b", "fastboot-deploy-info.json").is_none());
    }

    #[tokio::test]
    async fn activation_is_idempotent() {
        let store = seeded_store();
        let registry = registry(store.clone());

        registry.activate("a1").await.unwrap();
        registry.activate("a1").await.unwrap();

        let bodies: Vec<_> = store
            .calls()
            .iter()
            .filter_map(|c| match c {
                StoreCall::Put { key, body, .. } => Some((key.clone(), body.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0], bodies[1]);
    }

    #[tokio::test]
    async fn store_failures_propagate_from_activation() {
        let store = seeded_store();
        store.fail_puts("disk on fire");
        let registry = registry(store);

        let err = registry.activate("a1").await.unwrap_err();
        assert!(matches!(err, AirliftError::Store { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn prefixed_registry_reads_and_writes_under_the_prefix() {
        let store = MockStore::new();
        store.seed_object(
            "b",
            "apps/dist-abc.tar.gz",
            b"a".as_slice(),
            Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
        );
        let store = Arc::new(store);
        let registry = RevisionRegistry::new(
            store.clone(),
            "b",
            ArchiveNaming {
                prefix: Some("apps".to_string()),
                ..naming()
            },
        );

        registry.activate("abc").await.unwrap();
        let body = store.object("b", "apps/fastboot-deploy-info.json").unwrap();
        assert_eq!(&body[..], br#"{"bucket":"b","key":"apps/dist-abc.tar.gz"}"#);
    }
}
