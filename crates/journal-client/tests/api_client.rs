//! Facade tests against the real backend route table over in-memory stores,
//! served on an ephemeral loopback port.

use journal_backend::test_support::{TestServer, memory_backend, spawn_server};
use journal_client::{
    ApiClient, ClientError, EntryInput, FileTokenStore, MemoryTokenStore, SessionCache,
    SessionError, TOKEN_KEY, TokenStore,
};
use rstest::rstest;
use tempfile::TempDir;

fn start() -> TestServer {
    spawn_server(memory_backend()).expect("server starts")
}

fn client(server: &TestServer) -> ApiClient {
    ApiClient::new(server.base_url()).with_session(SessionCache::new(MemoryTokenStore::default()))
}

fn status_of(err: &ClientError) -> Option<u16> {
    err.status()
}

#[rstest]
#[tokio::test]
async fn full_journal_flow() {
    let server = start();
    let client = client(&server);

    let user = client.sign_up("alice", "secret123").await.expect("sign-up");
    assert_eq!(user.username, "alice");
    assert!(user.user_id > 0);

    let signed_in = client.sign_in("alice", "secret123").await.expect("sign-in");
    let session = client.session().expect("session attached");
    assert_eq!(session.user(), Some(signed_in.user.clone()));
    assert_eq!(session.read_token().as_deref(), Ok(signed_in.token.as_str()));

    let entry = client
        .add_entry(&EntryInput::new("Day 1", "hello", "http://x/y.png"))
        .await
        .expect("create");
    assert_eq!(client.read_entry(entry.entry_id).await.expect("get"), entry);
    assert_eq!(client.read_entries().await.expect("list"), vec![entry.clone()]);

    let mut edited = entry.input();
    edited.notes = "bye".to_owned();
    let updated = client
        .update_entry(entry.entry_id, &edited)
        .await
        .expect("update");
    assert_eq!(updated.notes, "bye");

    client.remove_entry(entry.entry_id).await.expect("delete");
    let err = client
        .read_entry(entry.entry_id)
        .await
        .expect_err("deleted entry is gone");
    assert_eq!(status_of(&err), Some(404));

    server.stop().await;
}

#[rstest]
#[tokio::test]
async fn errors_carry_status_and_server_message() {
    let server = start();
    let client = client(&server);
    client.sign_up("alice", "secret123").await.expect("sign-up");

    let err = client
        .sign_up("alice", "secret123")
        .await
        .expect_err("duplicate");
    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "username already taken");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = client
        .sign_in("alice", "wrong")
        .await
        .expect_err("bad password");
    assert_eq!(status_of(&err), Some(401));
    assert!(!client.session().expect("session").is_signed_in());

    server.stop().await;
}

#[rstest]
#[tokio::test]
async fn entry_calls_without_a_token_are_unauthorised() {
    let server = start();
    let client = client(&server);

    let err = client.read_entries().await.expect_err("no token");
    assert_eq!(status_of(&err), Some(401));

    let err = client
        .add_entry(&EntryInput::new("t", "n", "u"))
        .await
        .expect_err("no token");
    assert_eq!(status_of(&err), Some(401));

    server.stop().await;
}

#[rstest]
#[tokio::test]
async fn sign_out_drops_the_token() {
    let server = start();
    let client = client(&server);
    client.sign_up("alice", "secret123").await.expect("sign-up");
    client.sign_in("alice", "secret123").await.expect("sign-in");

    client.sign_out().expect("sign-out");

    let session = client.session().expect("session");
    assert_eq!(session.read_token(), Err(SessionError::NoToken));
    let err = client.read_entries().await.expect_err("signed out");
    assert_eq!(status_of(&err), Some(401));

    server.stop().await;
}

#[rstest]
#[tokio::test]
async fn persisted_token_is_reused_by_a_fresh_session() {
    let server = start();
    let dir = TempDir::new().expect("temp dir");

    let first = ApiClient::new(server.base_url()).with_session(SessionCache::new(
        FileTokenStore::open(dir.path()).expect("open store"),
    ));
    first.sign_up("alice", "secret123").await.expect("sign-up");
    first.sign_in("alice", "secret123").await.expect("sign-in");

    let store = FileTokenStore::open(dir.path()).expect("reopen store");
    assert!(store.get(TOKEN_KEY).expect("read").is_some());
    let second = ApiClient::new(server.base_url()).with_session(SessionCache::new(store));
    assert!(!second.session().expect("session").is_signed_in());
    assert_eq!(second.read_entries().await.expect("list"), vec![]);

    server.stop().await;
}

#[rstest]
#[tokio::test]
async fn unreachable_servers_are_transport_errors() {
    let server = start();
    let base_url = server.base_url();
    server.stop().await;

    let err = ApiClient::new(base_url)
        .read_entries()
        .await
        .expect_err("server stopped");
    assert!(matches!(err, ClientError::Transport { .. }));
}
