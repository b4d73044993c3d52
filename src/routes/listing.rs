use crate::body::{self, ResponseBody};
use crate::path::Resolved;
use crate::routes::status;
use headers::{ContentLength, HeaderMapExt};
use hyper::http::request::Parts;
use hyper::http::HeaderValue;
use hyper::{header, Method, Response, StatusCode};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::io;
use std::path::Path;
use tokio::fs;

const LINK: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

struct Entry {
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

pub async fn get(parts: &Parts, resolved: &Resolved) -> Response<ResponseBody> {
    let entries = match read_entries(&resolved.fs_path).await {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!(
                "{} {} -> [listing error] {} : {}",
                parts.method,
                parts.uri,
                resolved.fs_path.display(),
                e
            );
            return status(StatusCode::NOT_FOUND);
        }
    };

    log::info!(
        "{} {} -> [listing {} entries]",
        parts.method,
        parts.uri,
        entries.len()
    );
    let page = render(&resolved.decoded, &entries);
    let len = page.len() as u64;
    let mut resp = Response::new(if parts.method == Method::HEAD {
        body::empty()
    } else {
        body::full(page)
    });
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    resp.headers_mut().typed_insert(ContentLength(len));
    resp
}

async fn read_entries(dir: &Path) -> Result<Vec<Entry>, io::Error> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let file_type = entry.file_type().await?;
        let is_symlink = file_type.is_symlink();
        let is_dir = if is_symlink {
            // follow the link, broken links are listed as plain entries
            fs::metadata(entry.path())
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false)
        } else {
            file_type.is_dir()
        };
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }
    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

fn render(decoded_path: &str, entries: &[Entry]) -> String {
    let title = format!("Directory listing for {}", escape_html(decoded_path));
    let mut items = String::new();
    for entry in entries {
        let (display, link) = if entry.is_dir {
            (format!("{}/", entry.name), format!("{}/", entry.name))
        } else if entry.is_symlink {
            (format!("{}@", entry.name), entry.name.clone())
        } else {
            (entry.name.clone(), entry.name.clone())
        };
        items.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            utf8_percent_encode(&link, LINK),
            escape_html(&display)
        ));
    }
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>{title}</title>\n",
            "</head>\n",
            "<body>\n",
            "<h1>{title}</h1>\n",
            "<hr>\n",
            "<ul>\n",
            "{items}",
            "</ul>\n",
            "<hr>\n",
            "</body>\n",
            "</html>\n",
        ),
        title = title,
        items = items
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
