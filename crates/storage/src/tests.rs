#[cfg(test)]
mod storage_tests {
    use crate::{PromptStore, Storage, StorageError};
    use teleprompter_core::PromptInput;
    use teleprompter_core::constants::DELETED_MARKER;
    use tempfile::TempDir;

    fn create_test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let storage = Storage::new(&db_path).unwrap();
        (storage, temp_dir)
    }

    fn input(id: &str, text: &str) -> PromptInput {
        PromptInput::new(id.to_owned(), text.to_owned(), None)
    }

    #[test]
    fn test_storage_new_is_empty() {
        let (storage, _temp_dir) = create_test_storage();
        assert!(storage.list_prompts().unwrap().is_empty());
        assert!(storage.get_prompt_versions("missing").unwrap().is_empty());
    }

    #[test]
    fn test_write_then_get_returns_written_value() {
        let (storage, _temp_dir) = create_test_storage();

        let written = storage.write_prompt(&input("greet", "hi")).unwrap();
        let current = storage.get_prompt("greet").unwrap();

        assert_eq!(current.text, "hi");
        assert_eq!(current.version, written.version);
        assert_eq!(current, written);
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let (storage, _temp_dir) = create_test_storage();
        let err = storage.get_prompt("nope").unwrap_err();
        assert!(matches!(err, StorageError::NotFound { entity: "prompt", .. }));
    }

    #[test]
    fn test_every_write_and_delete_appends_one_history_entry() {
        let (storage, _temp_dir) = create_test_storage();

        storage.write_prompt(&input("greet", "one")).unwrap();
        assert_eq!(storage.get_prompt_versions("greet").unwrap().len(), 1);
        storage.write_prompt(&input("greet", "two")).unwrap();
        assert_eq!(storage.get_prompt_versions("greet").unwrap().len(), 2);
        storage.delete_prompt("greet").unwrap();
        assert_eq!(storage.get_prompt_versions("greet").unwrap().len(), 3);
    }

    #[test]
    fn test_versions_are_newest_first_and_strictly_increasing() {
        let (storage, _temp_dir) = create_test_storage();
        for i in 0..20 {
            storage.write_prompt(&input("greet", &format!("text {i}"))).unwrap();
        }

        let versions = storage.get_prompt_versions("greet").unwrap();
        assert_eq!(versions.len(), 20);
        assert_eq!(versions[0].text, "text 19");
        for pair in versions.windows(2) {
            assert!(pair[0].version > pair[1].version, "versions must be unique and ordered");
        }
    }

    #[test]
    fn test_current_version_has_matching_history_entry() {
        let (storage, _temp_dir) = create_test_storage();
        storage.write_prompt(&input("greet", "one")).unwrap();
        let latest = storage.write_prompt(&input("greet", "two")).unwrap();

        let entry = storage.get_prompt_version("greet", latest.version).unwrap().unwrap();
        assert_eq!(entry.text, "two");
        assert_eq!(entry.version, storage.get_prompt("greet").unwrap().version);
    }

    #[test]
    fn test_delete_leaves_marker_and_removes_current() {
        let (storage, _temp_dir) = create_test_storage();
        storage
            .write_prompt(&PromptInput::new("greet".into(), "hi".into(), Some("web".into())))
            .unwrap();

        let removed = storage.delete_prompt("greet").unwrap().unwrap();
        assert_eq!(removed.text, "hi");

        assert!(storage.get_prompt("greet").unwrap_err().is_not_found());
        let versions = storage.get_prompt_versions("greet").unwrap();
        assert_eq!(versions[0].text, DELETED_MARKER);
        assert!(versions[0].is_deleted_marker());
        assert_eq!(versions[0].namespace.as_deref(), Some("web"));
        assert!(storage.list_prompts().unwrap().is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (storage, _temp_dir) = create_test_storage();

        assert!(storage.delete_prompt("ghost").unwrap().is_none());
        let versions = storage.get_prompt_versions("ghost").unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].text, DELETED_MARKER);

        assert!(storage.delete_prompt("ghost").unwrap().is_none());
        assert_eq!(storage.get_prompt_versions("ghost").unwrap().len(), 2);
    }

    #[test]
    fn test_list_is_ordered_by_id() {
        let (storage, _temp_dir) = create_test_storage();
        for id in ["zeta", "alpha", "mid"] {
            storage.write_prompt(&input(id, "x")).unwrap();
        }
        let ids: Vec<String> = storage.list_prompts().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_write_updates_namespace() {
        let (storage, _temp_dir) = create_test_storage();
        storage
            .write_prompt(&PromptInput::new("greet".into(), "hi".into(), Some("a".into())))
            .unwrap();
        storage
            .write_prompt(&PromptInput::new("greet".into(), "hi".into(), Some("b".into())))
            .unwrap();
        assert_eq!(storage.get_prompt("greet").unwrap().namespace.as_deref(), Some("b"));
    }

    #[test]
    fn test_history_rejects_mutation() {
        let (storage, temp_dir) = create_test_storage();
        storage.write_prompt(&input("greet", "hi")).unwrap();

        let conn = rusqlite::Connection::open(temp_dir.path().join("test.db")).unwrap();
        assert!(conn.execute("UPDATE prompt_versions SET text = 'x'", []).is_err());
        assert!(conn.execute("DELETE FROM prompt_versions", []).is_err());
        assert_eq!(storage.get_prompt_versions("greet").unwrap().len(), 1);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        {
            let storage = Storage::new(&db_path).unwrap();
            storage.write_prompt(&input("greet", "hi")).unwrap();
        }
        let storage = Storage::new(&db_path).unwrap();
        assert_eq!(storage.get_prompt("greet").unwrap().text, "hi");
    }

    #[test]
    fn test_undecodable_history_row_fails_the_read() {
        let (storage, _temp_dir) = create_test_storage();
        storage.write_prompt(&input("greet", "hi")).unwrap();

        let conn = storage.pool.get().unwrap();
        conn.execute(
            "INSERT INTO prompt_versions (id, version, text, namespace)
             VALUES ('greet', 1, CAST(X'FF' AS TEXT), NULL)",
            [],
        )
        .unwrap();
        drop(conn);

        let err = storage.get_prompt_versions("greet").unwrap_err();
        assert!(matches!(err, StorageError::Database(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_async_trait_delegates() {
        let (storage, _temp_dir) = create_test_storage();
        let store: &dyn PromptStore = &storage;

        let written = store.write_prompt(&input("greet", "hi")).await.unwrap();
        assert_eq!(store.get_prompt("greet").await.unwrap(), written);
        assert_eq!(store.list_prompts().await.unwrap().len(), 1);
        assert!(store.get_prompt_version("greet", written.version).await.unwrap().is_some());
        assert!(store.get_prompt_version("greet", written.version - 1).await.unwrap().is_none());

        let removed = store.delete_prompt("greet").await.unwrap();
        assert_eq!(removed, Some(written));
        assert_eq!(store.get_prompt_versions("greet").await.unwrap().len(), 2);
    }
}
