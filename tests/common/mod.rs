#![allow(dead_code)]

pub mod artifact_server;

use artifact_harvest::Fetcher;
use std::time::Duration;

/// Fetcher that never goes through an environment proxy, so requests reach the local server
pub fn local_fetcher() -> Fetcher {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();
    Fetcher::with_client(client)
}
