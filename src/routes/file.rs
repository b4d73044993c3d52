use crate::body::{self, ResponseBody};
use crate::config::INDEX_FILES;
use crate::path;
use crate::routes::{listing, status, State};
use headers::{ContentLength, ContentType, HeaderMapExt, IfModifiedSince, IfNoneMatch, LastModified};
use hyper::http::request::Parts;
use hyper::http::HeaderValue;
use hyper::{header, Method, Response, StatusCode};
use std::fs::Metadata;
use std::io;
use std::path::Path;
use tokio::fs::{self, File};

pub async fn get(parts: &Parts, state: &State) -> Response<ResponseBody> {
    let resolved = match path::resolve(&state.root, parts.uri.path()) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("{} {} -> [bad path] {}", parts.method, parts.uri, e);
            return status(StatusCode::BAD_REQUEST);
        }
    };

    let metadata = match fs::metadata(&resolved.fs_path).await {
        Ok(m) => m,
        Err(e) => return file_error(parts, &resolved.fs_path, e),
    };

    if metadata.is_dir() {
        if !resolved.trailing_slash {
            return redirect_to_dir(parts);
        }
        for index in INDEX_FILES {
            let index_path = resolved.fs_path.join(index);
            if let Ok(m) = fs::metadata(&index_path).await {
                if m.is_file() {
                    return serve(parts, &index_path).await;
                }
            }
        }
        return listing::get(parts, &resolved).await;
    }

    if resolved.trailing_slash {
        log::warn!("{} {} -> [not a directory]", parts.method, parts.uri);
        return status(StatusCode::NOT_FOUND);
    }

    serve(parts, &resolved.fs_path).await
}

async fn serve(parts: &Parts, path: &Path) -> Response<ResponseBody> {
    let file = match File::open(path).await {
        Ok(f) => f,
        Err(e) => return file_error(parts, path, e),
    };
    let metadata = match file.metadata().await {
        Ok(m) => m,
        Err(e) => return file_error(parts, path, e),
    };

    if !is_modified(parts, &metadata) {
        log::info!("{} {} -> [not modified]", parts.method, parts.uri);
        let mut resp = status(StatusCode::NOT_MODIFIED);
        if let Ok(modified) = metadata.modified() {
            resp.headers_mut().typed_insert(LastModified::from(modified));
        }
        return resp;
    }

    log::info!(
        "{} {} -> [file {} bytes] {}",
        parts.method,
        parts.uri,
        metadata.len(),
        path.display()
    );
    let mut resp = Response::new(if parts.method == Method::HEAD {
        body::empty()
    } else {
        body::from_file(file)
    });
    let headers = resp.headers_mut();
    headers.typed_insert(ContentType::from(
        mime_guess::from_path(path).first_or_octet_stream(),
    ));
    headers.typed_insert(ContentLength(metadata.len()));
    if let Ok(modified) = metadata.modified() {
        headers.typed_insert(LastModified::from(modified));
    }
    resp
}

fn is_modified(parts: &Parts, metadata: &Metadata) -> bool {
    // If-None-Match takes precedence, and no entity tags are produced here
    if parts.headers.typed_get::<IfNoneMatch>().is_some() {
        return true;
    }
    match (parts.headers.typed_get::<IfModifiedSince>(), metadata.modified()) {
        (Some(since), Ok(modified)) => since.is_modified(modified),
        _ => true,
    }
}

fn redirect_to_dir(parts: &Parts) -> Response<ResponseBody> {
    let location = match parts.uri.query() {
        Some(query) => format!("{}/?{}", parts.uri.path(), query),
        None => format!("{}/", parts.uri.path()),
    };
    match HeaderValue::try_from(location) {
        Ok(location) => {
            log::info!("{} {} -> [redirect] {:?}", parts.method, parts.uri, location);
            let mut resp = status(StatusCode::MOVED_PERMANENTLY);
            resp.headers_mut().insert(header::LOCATION, location);
            resp
        }
        Err(e) => {
            log::warn!("{} {} -> [bad redirect] {}", parts.method, parts.uri, e);
            status(StatusCode::BAD_REQUEST)
        }
    }
}

fn file_error(parts: &Parts, path: &Path, e: io::Error) -> Response<ResponseBody> {
    log::warn!(
        "{} {} -> [file error] {} : {}",
        parts.method,
        parts.uri,
        path.display(),
        e
    );
    match e.kind() {
        io::ErrorKind::PermissionDenied => status(StatusCode::FORBIDDEN),
        _ => status(StatusCode::NOT_FOUND),
    }
}
