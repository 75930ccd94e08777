//! Round trips against a real deployment. Needs TASKFLOW_BACKEND_URL,
//! TASKFLOW_API_KEY and a confirmed test account in TASKFLOW_TEST_EMAIL /
//! TASKFLOW_TEST_PASSWORD.
//!
//! Run with: cargo test -- --ignored --test-threads=1

use taskflow_client::models::{Priority, TaskDraft};
use taskflow_client::store::SaveTask;
use taskflow_client::TaskFlow;

fn test_credentials() -> (String, String) {
    let email = std::env::var("TASKFLOW_TEST_EMAIL").expect("TASKFLOW_TEST_EMAIL not set");
    let password = std::env::var("TASKFLOW_TEST_PASSWORD").expect("TASKFLOW_TEST_PASSWORD not set");
    (email, password)
}

#[tokio::test]
#[ignore]
async fn sign_in_loads_the_task_list() {
    dotenvy::dotenv().ok();

    let mut flow = TaskFlow::from_env().expect("Failed to load backend config");
    let (email, password) = test_credentials();

    flow.sign_in(&email, &password).await.expect("Sign-in failed");
    assert!(flow.session().is_some());

    // the sign-in listener already loaded; a manual load must agree
    let after_listener = flow.repository().tasks().len();
    flow.load_tasks().await.expect("Manual load failed");
    assert_eq!(flow.repository().tasks().len(), after_listener);
}

#[tokio::test]
#[ignore]
async fn task_crud_round_trip() {
    dotenvy::dotenv().ok();

    let mut flow = TaskFlow::from_env().expect("Failed to load backend config");
    let (email, password) = test_credentials();
    flow.sign_in(&email, &password).await.expect("Sign-in failed");

    let mut draft = TaskDraft::new(format!(
        "integration test task {}",
        chrono::Utc::now().timestamp()
    ));
    draft.description = "created by backend_integration_test".to_string();
    draft.priority = Priority::High;

    let created = flow
        .save_task(SaveTask::Create(draft))
        .await
        .expect("Create failed");
    println!("created task {}", created.id);
    assert_eq!(created.priority, Priority::High);
    assert!(!created.pinned);

    let pinned = flow
        .toggle_pinned(created.id, created.pinned)
        .await
        .expect("Pin failed");
    assert!(pinned.pinned);
    assert!(pinned.updated_at > created.updated_at);

    let completed = flow
        .set_completed(created.id, true)
        .await
        .expect("Complete failed");
    assert!(completed.completed);

    flow.delete_task(created.id).await.expect("Delete failed");
    assert!(flow.repository().get(created.id).is_none());

    flow.load_tasks().await.expect("Reload failed");
    assert!(
        flow.repository().get(created.id).is_none(),
        "deleted task must not come back on reload"
    );

    flow.sign_out().await.expect("Sign-out failed");
    assert!(flow.session().is_none());
    assert!(flow.repository().tasks().is_empty());
}
