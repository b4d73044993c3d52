use crate::body::ResponseBody;
use crate::routes::{self, State};
use hyper::http::HeaderValue;
use hyper::{header, HeaderMap, Request, Response};

#[allow(clippy::declare_interior_mutable_const)]
const ANY: HeaderValue = HeaderValue::from_static("*");
#[allow(clippy::declare_interior_mutable_const)]
const ALLOWED_METHODS: HeaderValue = HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS");
#[allow(clippy::declare_interior_mutable_const)]
const ALLOWED_HEADERS: HeaderValue = HeaderValue::from_static("Content-Type");

/// Static file routes, with CORS headers added to whatever they respond with.
pub async fn respond_to_request<B>(req: Request<B>, state: &State) -> Response<ResponseBody> {
    let mut resp = routes::respond_to_request(req, state).await;
    allow_any_origin(resp.headers_mut());
    resp
}

pub fn allow_any_origin(headers: &mut HeaderMap) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, ANY);
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS);
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS);
}
