use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netbox_client::{NetboxClient, NetboxConfig};
use netbox_inventory::{DeviceCount, count_devices};

fn client_for(server: &MockServer) -> NetboxClient {
    let config = NetboxConfig::new(format!("{}/api", server.uri())).with_token("0123abcd");
    NetboxClient::new(&config).unwrap()
}

fn all_devices() -> Value {
    json!({
        "results": [
            {"id": 1, "name": "Device 1", "status": {"value": "active"}},
            {"id": 2, "name": "Device 2", "status": {"value": "planned"}},
            {"id": 3, "name": "Device 3", "status": {"value": "active"}},
            {"id": 4, "name": "Device 4", "status": {"value": "decommissioned"}}
        ]
    })
}

async fn mount_devices(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/"))
        .and(query_param_is_missing("status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_count_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/"))
        .and(query_param("status", "active"))
        .and(header("authorization", "Token 0123abcd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": 1, "name": "Device 1", "status": {"value": "active"}},
                {"id": 3, "name": "Device 3", "status": {"value": "active"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let count = count_devices(&client_for(&server), Some("active")).await.unwrap();
    assert_eq!(
        count,
        DeviceCount::Total {
            status: "active".to_string(),
            count: 2
        }
    );
    assert_eq!(count.total(), 2);
}

#[tokio::test]
async fn test_count_without_status() {
    let server = MockServer::start().await;
    mount_devices(&server, all_devices()).await;

    let count = count_devices(&client_for(&server), None).await.unwrap();
    assert_eq!(count.get("active"), Some(2));
    assert_eq!(count.get("planned"), Some(1));
    assert_eq!(count.get("decommissioned"), Some(1));
    assert_eq!(count.get("unknown"), None);
}

#[tokio::test]
async fn test_by_status_sum_matches_total() {
    let server = MockServer::start().await;
    mount_devices(&server, all_devices()).await;

    let count = count_devices(&client_for(&server), None).await.unwrap();
    let DeviceCount::ByStatus(counts) = &count else {
        panic!("expected per-status counts");
    };
    assert_eq!(counts.values().sum::<usize>(), 4);
    assert_eq!(count.total(), 4);
}

#[tokio::test]
async fn test_count_empty_results() {
    let server = MockServer::start().await;
    mount_devices(&server, json!({"count": 0, "next": null, "results": []})).await;

    let count = count_devices(&client_for(&server), None).await.unwrap();
    assert_eq!(count, DeviceCount::ByStatus(Default::default()));
}

#[tokio::test]
async fn test_count_missing_results_field() {
    let server = MockServer::start().await;
    mount_devices(&server, json!({})).await;

    let count = count_devices(&client_for(&server), None).await.unwrap();
    assert_eq!(count.total(), 0);
    assert_eq!(count, DeviceCount::ByStatus(Default::default()));
}

#[tokio::test]
async fn test_count_server_error_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(count_devices(&client_for(&server), None).await.is_none());
}

#[tokio::test]
async fn test_count_connection_failure_is_none() {
    // Closed port: the connection is refused before any HTTP exchange
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = NetboxConfig::new(format!("http://{addr}/api"));
    let client = NetboxClient::new(&config).unwrap();

    assert!(count_devices(&client, Some("active")).await.is_none());
}

#[tokio::test]
async fn test_count_looping_pagination_is_none() {
    let server = MockServer::start().await;
    let next = format!("{}/api/dcim/devices/", server.uri());
    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 4,
            "next": next,
            "results": [{"id": 1, "name": "Device 1", "status": {"value": "active"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(count_devices(&client_for(&server), None).await.is_none());
}
