use crate::body::{self, ResponseBody};
use hyper::{Method, Request, Response, StatusCode};
use std::path::PathBuf;

mod file;
mod listing;

pub struct State {
    root: PathBuf,
}

impl State {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

pub async fn respond_to_request<B>(req: Request<B>, state: &State) -> Response<ResponseBody> {
    // request bodies are never read
    let (parts, _) = req.into_parts();
    match parts.method {
        Method::OPTIONS => {
            log::info!("{} {} -> [preflight response]", parts.method, parts.uri);
            Response::new(body::empty())
        }
        Method::GET | Method::HEAD => file::get(&parts, state).await,
        _ => {
            log::warn!("{} {} -> [method not implemented]", parts.method, parts.uri);
            status(StatusCode::NOT_IMPLEMENTED)
        }
    }
}

fn status(status: StatusCode) -> Response<ResponseBody> {
    let mut resp = Response::new(body::empty());
    *resp.status_mut() = status;
    resp
}
