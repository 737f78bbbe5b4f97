//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for Shopdesk integration tests.

#![allow(dead_code)]

use app_lib::{create_app_state_with, AppState, Settings, ViewData};
use engine::Record;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Create a new test harness with an empty, still-loading store.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        TestHarness {
            state: create_app_state_with(settings),
        }
    }

    /// Create a harness loaded with the catalog fixture.
    pub fn with_catalog() -> Self {
        let harness = Self::new();
        harness.set_records(CatalogFixture::records());
        harness
    }

    pub fn set_records(&self, records: Vec<Record>) {
        self.state.composer.lock().unwrap().set_records(records);
    }

    pub fn view(&self) -> ViewData {
        app_lib::commands::get_view(&self.state).unwrap()
    }

    /// Ids of the current view, in view order.
    pub fn view_ids(&self) -> Vec<String> {
        ids(&self.view())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn ids(view: &ViewData) -> Vec<String> {
    view.rows.iter().map(|r| r.id.clone()).collect()
}

// ============================================================================
// TEST DATA FIXTURES
// ============================================================================

/// A small slice of the product catalog.
pub struct CatalogFixture;

impl CatalogFixture {
    pub fn data() -> Vec<(i64, &'static str, f64, &'static str, f64, u32)> {
        vec![
            (1, "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops", 109.95, "men's clothing", 3.9, 120),
            (2, "Mens Casual Premium Slim Fit T-Shirts", 22.3, "men's clothing", 4.1, 259),
            (3, "Mens Cotton Jacket", 55.99, "men's clothing", 4.7, 500),
            (5, "John Hardy Women's Legends Naga Gold & Silver Dragon Station Chain Bracelet", 695.0, "jewelery", 4.6, 400),
            (9, "WD 2TB Elements Portable External Hard Drive - USB 3.0", 64.0, "electronics", 3.3, 203),
            (12, "WD 4TB Gaming Drive Works with Playstation 4 Portable External Hard Drive", 114.0, "electronics", 4.8, 400),
            (15, "BIYLACLESIK Women's Snowboard Jacket Winter Coats", 56.99, "women's clothing", 2.6, 235),
            (18, "MBJ Women's Solid Short Sleeve Boat Neck V", 9.85, "women's clothing", 4.7, 130),
        ]
    }

    pub fn records() -> Vec<Record> {
        Self::data()
            .into_iter()
            .map(|(id, title, price, category, rate, count)| {
                Record::new(id, title, price, category)
                    .with_rating(rate, count)
                    .with_description(&format!("Catalog item in {}", category))
            })
            .collect()
    }

    pub fn json() -> String {
        serde_json::to_string(&Self::records()).unwrap()
    }
}

// ============================================================================
// HTTP STUB
// ============================================================================

/// Serve exactly one HTTP response on a local port and return its URL.
pub async fn serve_once(status: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}/products", addr)
}
