use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thumbgen::application::routes::app_router;
use thumbgen::application::state::{AppState, AppStateConfig};
use thumbgen::infrastructure::generation::{GenerationConfig, ResponseSchema};
use thumbgen::infrastructure::overlay::TextRenderer;
use tokio::net::TcpListener;
use tokio::task::AbortHandle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub address: String,
    pub mock_server: MockServer,
    dir: TempDir,
    stats_path: PathBuf,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.dir.path().join("thumbnails")
    }

    /// Directory above the storage root; a traversal escaping the root
    /// would land here.
    pub fn dir_above_storage(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_stats(&self, json: &str) {
        std::fs::write(&self.stats_path, json).expect("failed to write stats fixture");
    }

    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.storage_dir())
            .expect("failed to list storage dir")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_schema(ResponseSchema::OutputImages).await
}

pub async fn spawn_app_with_schema(schema: ResponseSchema) -> TestApp {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("failed to create temp dir");
    let stats_path = dir.path().join("thumbnail_stats.json");
    let storage_dir = dir.path().join("thumbnails");

    let state = AppState::from_config(AppStateConfig {
        generation: GenerationConfig {
            url: format!("{}/v1/query", mock_server.uri()),
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            schema,
        },
        stats_path: stats_path.clone(),
        storage_dir,
        // The bitmap renderer is deterministic across hosts.
        renderer: TextRenderer::Bitmap,
    });

    state
        .thumbnails
        .ensure_storage()
        .await
        .expect("failed to create storage dir");

    let app = app_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");

    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{local_addr}");

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    })
    .abort_handle();

    TestApp {
        address,
        mock_server,
        dir,
        stats_path,
        server_handle,
    }
}

/// A small valid PNG of a solid color, as the mocked generation service
/// would serve it.
pub fn png_fixture(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(color));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("failed to encode PNG fixture");
    bytes
}

/// Mount the submit + download pair for a successful generation: the submit
/// response points at an image URL also served by the mock.
pub async fn mount_generation_success(app: &TestApp, image: Vec<u8>) {
    let image_url = format!("{}/images/result.png", app.mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "output": { "images": [image_url] }
        })))
        .mount(&app.mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/images/result.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(image),
        )
        .mount(&app.mock_server)
        .await;
}
