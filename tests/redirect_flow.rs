//! End-to-end tests for the geo routing gateway.
//!
//! Runs the real server on a loopback listener with a table-backed resolver.
//! The test client connects from 127.0.0.1, which the resolver maps to
//! "Mexico"; requests for other countries go through the Unknown path.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use geo_router::config::{RouterConfig, FALLBACK_DOMAIN_KEY};
use geo_router::http::HttpServer;
use geo_router::lifecycle::Shutdown;

mod common;
use common::TableResolver;

fn gateway_config() -> RouterConfig {
    let mut config = RouterConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.observability.metrics_enabled = false;
    config.domains.insert("Mexico".to_string(), "x.mx".to_string());
    config
        .domains
        .insert(FALLBACK_DOMAIN_KEY.to_string(), "x.com".to_string());
    config
}

async fn start_gateway(config: RouterConfig) -> (SocketAddr, Shutdown) {
    let resolver = Arc::new(TableResolver::new(&[("127.0.0.1", "Mexico")]));
    let server = HttpServer::new(config, resolver).expect("valid test config");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn wrong_domain_gets_redirect_with_path_and_query() {
    let (addr, shutdown) = start_gateway(gateway_config()).await;

    let res = client()
        .get(format!("http://{}/matches/today?tz=utc", addr))
        .header("host", "x.com")
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 302);
    assert_eq!(
        res.headers()["location"],
        "http://x.mx/matches/today?tz=utc"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn canonical_domain_forwards_with_country_annotation() {
    let (addr, shutdown) = start_gateway(gateway_config()).await;

    let res = client()
        .get(format!("http://{}/", addr))
        .header("host", "x.mx")
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["x-geoip-country"], "Mexico");
    let body = res.text().await.unwrap();
    assert!(body.contains("Mexico"), "body should echo the country: {body}");

    shutdown.trigger();
}

#[tokio::test]
async fn excluded_path_is_served_on_any_domain() {
    let mut config = gateway_config();
    config.excluded_paths.push("/health".to_string());
    let (addr, shutdown) = start_gateway(config).await;

    // Host x.com is wrong for Mexico, but /health is exempt.
    let res = client()
        .get(format!("http://{}/health", addr))
        .header("host", "x.com")
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["x-geoip-country"], "Mexico");

    shutdown.trigger();
}

#[tokio::test]
async fn unresolvable_override_ip_degrades_to_fallback_domain() {
    let mut config = gateway_config();
    config.allow_ip_override = true;
    let (addr, shutdown) = start_gateway(config).await;

    // 198.51.100.9 is not in the resolver table, so the country is Unknown
    // and x.com (the fallback domain) is canonical.
    let res = client()
        .get(format!("http://{}/?ip=198.51.100.9", addr))
        .header("host", "x.com")
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["x-geoip-country"], "Unknown");

    shutdown.trigger();
}

#[tokio::test]
async fn request_limit_queues_excess_requests_instead_of_failing() {
    let mut config = gateway_config();
    config.listener.max_connections = 1;
    let (addr, shutdown) = start_gateway(config).await;

    let client = client();
    let mut handles = Vec::new();
    for _ in 0..4 {
        let client = client.clone();
        let url = format!("http://{}/", addr);
        handles.push(tokio::spawn(async move {
            client
                .get(url)
                .header("host", "x.mx")
                .send()
                .await
                .expect("gateway unreachable")
                .status()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), 200);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn config_without_fallback_domain_is_rejected_at_startup() {
    let mut config = gateway_config();
    config.domains.remove(FALLBACK_DOMAIN_KEY);

    let resolver = Arc::new(TableResolver::new(&[]));
    assert!(HttpServer::new(config, resolver).is_err());
}
