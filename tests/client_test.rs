use taskflow_client::models::TaskPatch;
use taskflow_client::{BackendConfig, Error, TaskFlow};
use uuid::Uuid;

fn client() -> TaskFlow {
    // No request ever leaves in these tests; the URL is never dialed.
    TaskFlow::new(BackendConfig::new("https://project.example.test", "anon-key")).unwrap()
}

#[tokio::test]
async fn sign_up_is_gated_on_the_password_policy() {
    let mut flow = client();

    // rejected client-side, before any request is built
    let err = flow.sign_up("you@example.com", "abc").await.unwrap_err();
    match err {
        Error::PasswordPolicy(message) => {
            assert!(message.contains("Minimum 8 characters"));
            assert!(message.contains("uppercase"));
            assert!(message.contains("number"));
            assert!(message.contains("symbol"));
            // lowercase rule is met and must not be reported
            assert!(!message.contains("lowercase"));
        }
        other => panic!("expected PasswordPolicy, got {:?}", other),
    }
}

#[tokio::test]
async fn task_operations_require_a_session() {
    let mut flow = client();
    assert!(flow.session().is_none());

    assert!(matches!(flow.load_tasks().await, Err(Error::NotAuthenticated)));
    assert!(matches!(
        flow.set_completed(Uuid::new_v4(), true).await,
        Err(Error::NotAuthenticated)
    ));
    assert!(matches!(
        flow.update_task(Uuid::new_v4(), TaskPatch::pinned(true)).await,
        Err(Error::NotAuthenticated)
    ));
    assert!(matches!(flow.delete_task(Uuid::new_v4()).await, Err(Error::NotAuthenticated)));
    assert!(matches!(flow.sign_out().await, Err(Error::NotAuthenticated)));
    assert!(matches!(flow.delete_account().await, Err(Error::NotAuthenticated)));
}

#[tokio::test]
async fn subscribers_start_signed_out() {
    let flow = client();
    let rx = flow.subscribe();
    assert!(rx.borrow().is_none());
    assert!(flow.repository().tasks().is_empty());
}
