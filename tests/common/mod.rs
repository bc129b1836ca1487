//! Shared harness: an in-process server backed by the memory store.

#![allow(dead_code)]

use reqwest::header::LOCATION;
use reqwest::{Response, StatusCode};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use wanderlust::{create_router, transport, AppState, DocumentId, DocumentStore, Listing, MemoryStore};

pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub const CABIN: &[(&str, &str)] = &[
    ("listing[title]", "Cabin"),
    ("listing[description]", "Woods"),
    ("listing[price]", "100"),
    ("listing[location]", "Aspen"),
    ("listing[country]", "USA"),
];

impl TestServer {
    pub async fn start() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = create_router(AppState::new(store.clone()));

        // Ephemeral port so tests can run in parallel.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            transport::http::serve(listener, router, std::future::pending())
                .await
                .unwrap();
        });

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            store,
            client,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client.post(self.url(path)).form(form).send().await.unwrap()
    }

    /// Creates the Cabin listing through the form route and returns it from the store.
    pub async fn create_cabin(&self) -> Listing {
        let before = self.store.list_listings().await.unwrap();
        let resp = self.post_form("/listings", CABIN).await;
        assert_redirect(&resp, "/listings");
        let after = self.store.list_listings().await.unwrap();
        assert_eq!(after.len(), before.len() + 1);
        after.last().cloned().unwrap()
    }

    pub async fn listing(&self, id: &DocumentId) -> Option<Listing> {
        self.store
            .list_listings()
            .await
            .unwrap()
            .into_iter()
            .find(|l| &l.id == id)
    }
}

pub fn assert_redirect(resp: &Response, location: &str) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[LOCATION].to_str().unwrap(), location);
}
