use facilita_core::auth::{AcceptAllVerifier, SessionState, SessionStore};
use facilita_core::data::DataStore;
use facilita_core::request::{NewRequest, RequestStatus, RequestUpdate};
use facilita_core::storage::{KeyValueStorage, StorageKey};
use facilita_core::user::UserRole;
use facilita_infrastructure::JsonFileStorage;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn open_storage(temp_dir: &TempDir) -> Arc<JsonFileStorage> {
    Arc::new(JsonFileStorage::new(temp_dir.path()).expect("Should open storage"))
}

#[test]
fn test_fresh_directory_is_seeded() {
    let temp_dir = TempDir::new().unwrap();
    let store = DataStore::load(open_storage(&temp_dir), true);

    assert_eq!(store.services().len(), 3);
    assert!(store.requests().is_empty());
    // The seeded catalog is written back so later runs read it from disk
    assert!(temp_dir.path().join("facilita_services.json").exists());
}

#[test]
fn test_data_survives_reload() {
    let temp_dir = TempDir::new().unwrap();

    let (request_id, conversation_id) = {
        let mut store = DataStore::load(open_storage(&temp_dir), true);
        let request = store.create_request(NewRequest {
            customer_id: "usr_c".to_string(),
            provider_id: "provider1".to_string(),
            service_id: "1".to_string(),
            address: "Rua A, 10".to_string(),
            scheduled_date: "2024-03-01".to_string(),
            scheduled_time: "09:00".to_string(),
            description: "Limpeza geral".to_string(),
            value: 150.0,
            ..NewRequest::default()
        });
        store
            .update_request(&request.id, RequestUpdate::status(RequestStatus::Accepted))
            .unwrap();
        let conversation = store.create_conversation(
            &request.id,
            vec!["usr_c".to_string(), "provider1".to_string()],
        );
        store
            .send_message(&conversation.id, "usr_c", "Olá!")
            .unwrap();
        (request.id, conversation.id)
    };

    let reloaded = DataStore::load(open_storage(&temp_dir), true);

    let request = reloaded.get_request_by_id(&request_id).unwrap();
    assert_eq!(request.status, RequestStatus::Accepted);
    assert_eq!(request.value, 150.0);
    let messages = reloaded.get_messages_by_conversation_id(&conversation_id);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "Olá!");
    assert_eq!(
        reloaded
            .get_conversation_by_id(&conversation_id)
            .unwrap()
            .last_message
            .as_deref(),
        Some("Olá!")
    );
}

#[test]
fn test_corrupt_file_loads_empty_family() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("facilita_requests.json"), "{not json").unwrap();

    let store = DataStore::load(open_storage(&temp_dir), true);

    assert!(store.requests().is_empty());
    assert_eq!(store.services().len(), 3);
}

#[tokio::test]
async fn test_session_record_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let storage = open_storage(&temp_dir);

    let mut session = SessionStore::new(storage.clone(), Arc::new(AcceptAllVerifier));
    session.initialize();
    let user = session
        .login("cliente@example.com", "123456", UserRole::Customer)
        .await
        .unwrap();

    let raw = storage.get(StorageKey::User).unwrap().unwrap();
    assert!(raw.contains("\"createdAt\""));
    assert!(raw.contains("\"customer\""));

    let mut restarted = SessionStore::new(open_storage(&temp_dir), Arc::new(AcceptAllVerifier));
    assert_eq!(
        restarted.initialize(),
        &SessionState::Authenticated(user)
    );

    restarted.logout();
    assert!(!temp_dir.path().join("facilita_user.json").exists());
}
