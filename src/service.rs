//! The `/slice` HTTP endpoint.
//!
//! Every request re-reads the configured volume, cuts the requested plane,
//! rotates it for display and answers with a PNG. Nothing is cached between
//! requests and the only shared state is the immutable [`ServiceConfig`].

use crate::enums::View;
use crate::volume::{RenderError, Volume};
use crate::volume_loader::{VolumeLoader, VolumeLoaderError};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::task;
use tower_http::trace::TraceLayer;

pub const DEFAULT_INDEX: i64 = 100;

/// Settings fixed at startup and shared by all requests
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub volume_path: PathBuf,
    /// Expose internal error messages in 500 responses
    pub debug: bool,
}

#[derive(Debug, Error)]
pub enum SliceError {
    #[error("Invalid view")]
    InvalidView(String),

    #[error("Invalid index")]
    InvalidIndex(String),

    #[error("Index {index} is out of range for {view} view (axis length {len})")]
    IndexOutOfRange { index: i64, view: View, len: usize },

    #[error("Failed to load volume: {0}")]
    Load(#[from] VolumeLoaderError),

    #[error("Failed to render slice: {0}")]
    Render(#[from] RenderError),

    #[error("Slice task failed: {0}")]
    Task(#[from] task::JoinError),
}

impl SliceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SliceError::InvalidView(_)
            | SliceError::InvalidIndex(_)
            | SliceError::IndexOutOfRange { .. } => StatusCode::BAD_REQUEST,
            SliceError::Load(_) | SliceError::Render(_) | SliceError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Plain-text error response. Server error details are only included
    /// when `debug` is set.
    pub fn into_http_response(self, debug: bool) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "slice request failed");
            if !debug {
                return (status, "Internal Server Error").into_response();
            }
        } else {
            tracing::debug!(error = %self, "rejected slice request");
        }
        (status, self.to_string()).into_response()
    }
}

/// Raw query parameters of `GET /slice`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SliceQuery {
    pub index: Option<String>,
    pub view: Option<String>,
}

impl SliceQuery {
    /// Collect the decoded `key=value` pairs of a query string. A repeated
    /// key keeps its first value; unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "index" => &mut query.index,
                "view" => &mut query.view,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceRequest {
    pub index: i64,
    pub view: View,
}

impl Default for SliceRequest {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX,
            view: View::default(),
        }
    }
}

impl SliceRequest {
    /// Validate the query parameters, filling in defaults for absent ones.
    /// The index is only checked for being an integer here; bounds depend on
    /// the volume and are checked after loading.
    pub fn from_query(query: &SliceQuery) -> Result<Self, SliceError> {
        let index = match query.index.as_deref() {
            None => DEFAULT_INDEX,
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| SliceError::InvalidIndex(raw.to_owned()))?,
        };
        let view = match query.view.as_deref() {
            None => View::default(),
            Some(raw) => raw.parse().map_err(|_| SliceError::InvalidView(raw.to_owned()))?,
        };
        Ok(Self { index, view })
    }
}

/// Load the volume at `path` and render the requested slice as PNG bytes
pub fn render_png(path: &Path, request: SliceRequest) -> Result<Vec<u8>, SliceError> {
    let volume = VolumeLoader::load_from_file(path)?;
    let len = volume.axis_len(request.view);
    let index = usize::try_from(request.index)
        .ok()
        .filter(|&index| index < len)
        .ok_or(SliceError::IndexOutOfRange {
            index: request.index,
            view: request.view,
            len,
        })?;

    let image = volume.get_image_from_axis(index, request.view)?;
    let png = Volume::encode_png(&image)?;
    tracing::debug!(
        view = %request.view,
        index,
        width = image.width(),
        height = image.height(),
        bytes = png.len(),
        "rendered slice"
    );
    Ok(png)
}

async fn slice_png(config: &ServiceConfig, query: &SliceQuery) -> Result<Vec<u8>, SliceError> {
    let request = SliceRequest::from_query(query)?;
    let path = config.volume_path.clone();
    task::spawn_blocking(move || render_png(&path, request)).await?
}

/// `GET /slice?index=<int>&view=<axial|sagittal|coronal>`
pub async fn get_slice(
    State(config): State<Arc<ServiceConfig>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = SliceQuery::from_pairs(pairs);
    match slice_png(&config, &query).await {
        Ok(png) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Err(err) => err.into_http_response(config.debug),
    }
}

pub fn router(config: ServiceConfig) -> Router {
    Router::new()
        .route("/slice", get(get_slice))
        .with_state(Arc::new(config))
        .layer(TraceLayer::new_for_http())
}
