use once_cell::sync::Lazy;
use poker_tracker::models::{BoardResponse, EntryResponse, PlayerEntry, SaveResponse, Session};
use reqwest::{Client, StatusCode};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("poker_tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/board")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    spawn_server_at(unique_data_path()).await
}

async fn spawn_server_at(data_path: String) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_poker_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

fn session(id: u64, date: &str, entries: &[(&str, i64)]) -> Session {
    let mut session = Session::new(Some(id), date);
    session.players = entries
        .iter()
        .map(|(player, ending)| PlayerEntry::new(*player, 1000, *ending))
        .collect();
    session
}

async fn save(client: &Client, base_url: &str, sessions: &[Session]) -> SaveResponse {
    let response = client
        .post(format!("{base_url}/api/save"))
        .json(sessions)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

async fn load(client: &Client, base_url: &str) -> Vec<Session> {
    client
        .get(format!("{base_url}/poker-sessions.json"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_fresh_server_has_no_sessions_file() {
    let server = spawn_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/poker-sessions.json", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let board: BoardResponse = client
        .get(format!("{}/api/board", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(board.standings.is_empty());
    assert!(board.history.is_empty());
}

#[tokio::test]
async fn http_save_then_load_roundtrips() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let sessions = vec![
        session(1, "2023-01-01", &[("Papa", 1050), ("Mama", 950)]),
        session(2, "2023-12-31", &[("Papa", 980)]),
    ];
    let saved = save(&client, &server.base_url, &sessions).await;
    assert!(saved.success);

    assert_eq!(load(&client, &server.base_url).await, sessions);

    let board: BoardResponse = client
        .get(format!("{}/api/board", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let year = board.yearly.iter().find(|y| y.year == "2023").expect("2023 bucket");
    let papa = year.players.iter().find(|p| p.player == "Papa").expect("Papa row");
    assert_eq!(papa.total, 30);
}

#[tokio::test]
async fn http_entry_for_same_player_and_date_is_upserted() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    save(&client, &server.base_url, &[]).await;

    for ending in [1200, 700] {
        let response = client
            .post(format!("{}/api/entries", server.base_url))
            .json(&serde_json::json!({
                "date": "2024-03-01",
                "player": "Papa",
                "starting": 1000,
                "ending": ending
            }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        let body: EntryResponse = response.json().await.unwrap();
        assert!(body.saved);
    }

    let stored = load(&client, &server.base_url).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].players, vec![PlayerEntry::new("Papa", 1000, 700)]);
    assert_eq!(stored[0].id, Some(1));
}

#[tokio::test]
async fn http_delete_removes_one_session() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let sessions = vec![
        session(1, "2024-01-01", &[("Papa", 990)]),
        session(2, "2024-01-08", &[("Papa", 995)]),
        session(3, "2024-01-15", &[("Papa", 1020)]),
    ];
    save(&client, &server.base_url, &sessions).await;

    let response = client
        .delete(format!("{}/api/sessions/2024-01-08", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let board: BoardResponse = response.json().await.unwrap();
    assert_eq!(board.history.len(), 2);
    assert_eq!(board.streaks[0].win, 1);

    let stored = load(&client, &server.base_url).await;
    assert_eq!(stored, vec![sessions[0].clone(), sessions[2].clone()]);

    let missing = client
        .delete(format!("{}/api/sessions/2024-01-08", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_rejects_entry_without_player() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&serde_json::json!({ "date": "2024-03-01", "player": "  ", "ending": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

async fn post_entry(client: &Client, base_url: &str, body: serde_json::Value) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/entries"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn board(client: &Client, base_url: &str) -> BoardResponse {
    client
        .get(format!("{base_url}/api/board"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_malformed_chip_counts_are_bad_requests() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let bodies = [
        serde_json::json!({ "date": "2024-03-01", "player": "Papa", "ending": "abc" }),
        serde_json::json!({ "date": "2024-03-01", "player": "Papa" }),
    ];
    for body in bodies {
        let response = post_entry(&client, &server.base_url, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    }

    let response = client
        .post(format!("{}/api/save", server.base_url))
        .json(&serde_json::json!([{ "date": "2024-03-01", "players": [{ "player": "Papa", "ending": "lots" }] }]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn http_clear_all_empties_board_and_file() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let sessions = vec![
        session(1, "2024-01-01", &[("Papa", 990)]),
        session(2, "2024-01-08", &[("Mama", 1100)]),
    ];
    save(&client, &server.base_url, &sessions).await;

    let response = client
        .delete(format!("{}/api/sessions", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let cleared: BoardResponse = response.json().await.unwrap();
    assert!(cleared.standings.is_empty());
    assert!(cleared.history.is_empty());

    assert!(board(&client, &server.base_url).await.history.is_empty());
    assert!(load(&client, &server.base_url).await.is_empty());
}

#[tokio::test]
async fn http_write_failures_keep_memory_state() {
    let mut data_dir = std::env::temp_dir();
    data_dir.push(format!(
        "poker_tracker_http_dir_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let data_path = data_dir.join("sessions.json");
    let server = spawn_server_at(data_path.to_string_lossy().to_string()).await;
    let client = Client::new();

    let first = post_entry(
        &client,
        &server.base_url,
        serde_json::json!({ "date": "2024-03-01", "player": "Papa", "ending": 1200 }),
    )
    .await;
    let first: EntryResponse = first.json().await.unwrap();
    assert!(first.saved);

    std::fs::remove_dir_all(&data_dir).unwrap();

    let response = client
        .post(format!("{}/api/save", server.base_url))
        .json(&vec![session(9, "2020-01-01", &[("Mama", 500)])])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let unchanged = board(&client, &server.base_url).await;
    assert_eq!(unchanged.history.len(), 1);
    assert_eq!(unchanged.history[0].date, "2024-03-01");

    let second = post_entry(
        &client,
        &server.base_url,
        serde_json::json!({ "date": "2024-03-08", "player": "Papa", "ending": 900 }),
    )
    .await;
    assert!(second.status().is_success());
    let second: EntryResponse = second.json().await.unwrap();
    assert!(!second.saved);
    assert_eq!(second.board.history.len(), 2);
    assert_eq!(second.board.standings[0].total, 100);
}
