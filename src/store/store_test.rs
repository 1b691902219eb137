//! Task store tests

use super::*;
use tempfile::TempDir;

/// Helper to create a test store
async fn create_test_store() -> (TaskStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let store = TaskStore::connect(&db_path).await.unwrap();
    (store, temp_dir)
}

fn new_task(titulo: &str) -> NewTask {
    NewTask {
        titulo: titulo.to_string(),
        descricao: None,
    }
}

#[tokio::test]
async fn test_store_connection() {
    let (_store, _temp_dir) = create_test_store().await;
    // Connection and migrations successful if we get here without panicking
}

#[tokio::test]
async fn test_create_and_get() {
    let (store, _temp_dir) = create_test_store().await;

    let created = store.create(new_task("estudar rust")).await.unwrap();
    assert_eq!(created.titulo, "estudar rust");
    assert!(!created.completa);

    let fetched = store.get(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.titulo, "estudar rust");
}

#[tokio::test]
async fn test_create_rejects_blank_title() {
    let (store, _temp_dir) = create_test_store().await;

    let error = store.create(new_task("   ")).await.unwrap_err();
    assert!(matches!(
        error,
        StoreError::Validation(message) if message == "título obrigatório"
    ));
}

#[tokio::test]
async fn test_get_missing_task() {
    let (store, _temp_dir) = create_test_store().await;

    let error = store.get(999).await.unwrap_err();
    assert!(matches!(
        error,
        StoreError::Missing(message) if message == "tarefa não encontrada"
    ));
}

#[tokio::test]
async fn test_list_returns_tasks_in_insertion_order() {
    let (store, _temp_dir) = create_test_store().await;

    store.create(new_task("primeira")).await.unwrap();
    store.create(new_task("segunda")).await.unwrap();

    let tasks = store.list().await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].titulo, "primeira");
    assert_eq!(tasks[1].titulo, "segunda");
}

#[tokio::test]
async fn test_partial_update_preserves_other_fields() {
    let (store, _temp_dir) = create_test_store().await;

    let created = store
        .create(NewTask {
            titulo: "comprar café".to_string(),
            descricao: Some("moído".to_string()),
        })
        .await
        .unwrap();

    let updated = store
        .update(created.id, TaskChanges::set_complete(true))
        .await
        .unwrap();
    assert!(updated.completa);
    assert_eq!(updated.titulo, "comprar café");
    assert_eq!(updated.descricao, Some("moído".to_string()));
}

#[tokio::test]
async fn test_explicit_null_clears_descricao() {
    let (store, _temp_dir) = create_test_store().await;

    let created = store
        .create(NewTask {
            titulo: "limpar".to_string(),
            descricao: Some("texto antigo".to_string()),
        })
        .await
        .unwrap();

    let updated = store
        .update(
            created.id,
            TaskChanges {
                descricao: Some(None),
                ..TaskChanges::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.descricao, None);
    assert_eq!(updated.titulo, "limpar");
}

#[tokio::test]
async fn test_sequential_partial_updates_compose() {
    let (store, _temp_dir) = create_test_store().await;

    let created = store.create(new_task("original")).await.unwrap();

    store
        .update(
            created.id,
            TaskChanges {
                titulo: Some("renomeada".to_string()),
                ..TaskChanges::default()
            },
        )
        .await
        .unwrap();

    let final_task = store
        .update(created.id, TaskChanges::set_complete(true))
        .await
        .unwrap();
    assert_eq!(final_task.titulo, "renomeada");
    assert!(final_task.completa);
}

#[tokio::test]
async fn test_update_rejects_blank_title() {
    let (store, _temp_dir) = create_test_store().await;

    let created = store.create(new_task("x")).await.unwrap();
    let error = store
        .update(
            created.id,
            TaskChanges {
                titulo: Some(String::new()),
                ..TaskChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(error, StoreError::Validation(_)));
}

#[tokio::test]
async fn test_update_missing_task() {
    let (store, _temp_dir) = create_test_store().await;

    let error = store
        .update(42, TaskChanges::set_complete(true))
        .await
        .unwrap_err();
    assert!(matches!(error, StoreError::Missing(_)));
}

#[tokio::test]
async fn test_delete_returns_removed_task() {
    let (store, _temp_dir) = create_test_store().await;

    let created = store.create(new_task("descartável")).await.unwrap();
    let deleted = store.delete(created.id).await.unwrap();
    assert_eq!(deleted.id, created.id);

    let error = store.get(created.id).await.unwrap_err();
    assert!(matches!(error, StoreError::Missing(_)));
}
