//! End-to-end run against a live server over real HTTP.
//!
//! # Design
//! Boots the server on an ephemeral port in a background thread, then walks
//! the seed-add-update-delete scenario with ureq.

use serde_json::{json, Value};
use todo_core::Todo;
use todo_server::{ListResponse, ServerConfig, UpdateResponse};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener, ServerConfig::default()).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn list(agent: &ureq::Agent, base: &str) -> Vec<Todo> {
    agent
        .get(&format!("{base}/todo"))
        .call()
        .unwrap()
        .body_mut()
        .read_json()
        .unwrap()
}

#[test]
fn seed_add_update_delete_scenario() {
    let base = start_server();
    let agent = agent();

    // Step 1: seeds are present.
    let todos = list(&agent, &base);
    assert_eq!(todos.len(), 2);

    // Step 2: add gets id 2.
    let body: ListResponse = agent
        .post(&format!("{base}/todo"))
        .send_json(json!({"label": "Buy milk", "done": false}))
        .unwrap()
        .body_mut()
        .read_json()
        .unwrap();
    assert_eq!(body.updated_list.last().map(|t| t.id), Some(2));
    assert_eq!(list(&agent, &base).len(), 3);

    // Step 3: mark it done; it stays at the tail.
    let body: UpdateResponse = agent
        .put(&format!("{base}/todo/2"))
        .send_json(json!({"done": true}))
        .unwrap()
        .body_mut()
        .read_json()
        .unwrap();
    assert_eq!(body.updated_to.done(), Some(true));
    assert_eq!(list(&agent, &base).last().map(|t| t.id), Some(2));

    // Step 4: delete the first seed.
    let mut response = agent.delete(&format!("{base}/todo/0")).call().unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: ListResponse = response.body_mut().read_json().unwrap();
    assert_eq!(body.updated_list.len(), 2);
    let todos = list(&agent, &base);
    assert_eq!(todos.len(), 2);
    assert!(todos.iter().all(|t| t.id != 0));

    // Step 5: updating the deleted id is a 404 with an error envelope.
    let mut response = agent
        .put(&format!("{base}/todo/0"))
        .send_json(json!({"done": false}))
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.body_mut().read_json().unwrap();
    assert_eq!(body["code"], 404);
}
