//! Fixtures shared by the flow tests.

use bytes::Bytes;
use image::{DynamicImage, Rgba, RgbaImage};
use materials_api_client::ApiClient;
use std::io::Cursor;
use std::time::Duration;

pub const MATERIALS_JSON: &str = r#"[
    {"id": 1, "name": "Green tea", "category": "image", "image": "tea.jpg", "text": "tea.txt"},
    {"id": 2, "name": "Store notes", "type": "text", "text": "notes.txt"},
    {"id": 3, "name": "Rice crackers", "category": "snack"}
]"#;

pub fn client_for(server: &mockito::Server) -> ApiClient {
    ApiClient::new(&server.url(), Duration::from_secs(5)).unwrap()
}

/// Mock `GET /materials/{id}?type=text` returning `body`.
pub async fn mock_text(
    server: &mut mockito::Server,
    id: u32,
    status: usize,
    body: &str,
) -> mockito::Mock {
    server
        .mock("GET", format!("/materials/{}", id).as_str())
        .match_query(mockito::Matcher::UrlEncoded("type".into(), "text".into()))
        .with_status(status)
        .with_body(body)
        .create_async()
        .await
}

/// Mock the full `GET /materials` list plus a text preview per item.
pub async fn mock_material_list(server: &mut mockito::Server) -> Vec<mockito::Mock> {
    let mut mocks = vec![
        server
            .mock("GET", "/materials")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(MATERIALS_JSON)
            .create_async()
            .await,
    ];
    mocks.push(mock_text(server, 1, 200, "Fresh green tea").await);
    mocks.push(mock_text(server, 2, 200, "Open 9-17").await);
    mocks.push(mock_text(server, 3, 404, r#"{"error": "File not found"}"#).await);
    mocks
}

/// A solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Bytes {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 180, 40, 255]));
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .unwrap();
    Bytes::from(buffer)
}
