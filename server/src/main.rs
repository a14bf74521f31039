//! Static file server for the Vantura Campers site: plain byte serving from
//! one directory, content type keyed by file extension. `/` serves
//! `index.html`; a missing file is a 404, any other read failure a 500.

use std::io::ErrorKind;
use std::net::Ipv4Addr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Serve the site directory over HTTP")]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Directory to serve.
    #[arg(long, default_value = "site")]
    dir: PathBuf,
}

/// Content type for a served file, by extension. Unknown extensions are
/// shipped as opaque bytes.
fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") => "text/html",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",
        Some("png") => "image/png",
        Some("jpg") => "image/jpg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Map a request path into the served directory. `/` becomes `index.html`;
/// anything trying to climb out of the directory is rejected.
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    let relative = if trimmed.is_empty() {
        Path::new("index.html")
    } else {
        Path::new(trimmed)
    };
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

async fn serve_file(State(root): State<Arc<PathBuf>>, uri: Uri) -> Response {
    let Some(path) = resolve(&root, uri.path()) else {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    };
    match tokio::fs::read(&path).await {
        Ok(content) => {
            tracing::debug!(path = %path.display(), bytes = content.len(), "served");
            ([(header::CONTENT_TYPE, content_type(&path))], content).into_response()
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "not found");
            (StatusCode::NOT_FOUND, "File not found").into_response()
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "read failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server error: {}", err.kind()),
            )
                .into_response()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let root = Arc::new(args.dir.clone());
    let app = Router::new().fallback(serve_file).with_state(root);

    let listener = tokio::net::TcpListener::bind((Ipv4Addr::UNSPECIFIED, args.port))
        .await
        .with_context(|| format!("could not bind port {}", args.port))?;
    tracing::info!(
        "serving {} at http://localhost:{}",
        args.dir.display(),
        args.port
    );
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_match_the_served_extensions() {
        assert_eq!(content_type(Path::new("index.html")), "text/html");
        assert_eq!(
            content_type(Path::new("translations/sk.json")),
            "application/json"
        );
        assert_eq!(content_type(Path::new("pkg/site.wasm")), "application/wasm");
        assert_eq!(content_type(Path::new("logo.SVG")), "image/svg+xml");
        assert_eq!(
            content_type(Path::new("download.bin")),
            "application/octet-stream"
        );
        assert_eq!(content_type(Path::new("LICENSE")), "application/octet-stream");
    }

    #[test]
    fn root_serves_the_index() {
        let root = Path::new("site");
        assert_eq!(resolve(root, "/"), Some(PathBuf::from("site/index.html")));
    }

    #[test]
    fn plain_paths_stay_inside_the_directory() {
        let root = Path::new("site");
        assert_eq!(
            resolve(root, "/translations/en.json"),
            Some(PathBuf::from("site/translations/en.json"))
        );
    }

    #[test]
    fn parent_components_are_rejected() {
        let root = Path::new("site");
        assert_eq!(resolve(root, "/../Cargo.toml"), None);
        assert_eq!(resolve(root, "/translations/../../secret"), None);
    }
}
