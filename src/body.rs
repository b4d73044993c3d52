use crate::config::FILE_BUFFER_SIZE;
use crate::err::Error;
use futures::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

pub type ResponseBody = BoxBody<Bytes, Error>;

pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

pub fn full(bytes: impl Into<Bytes>) -> ResponseBody {
    Full::new(bytes.into())
        .map_err(|never| match never {})
        .boxed()
}

pub fn from_file(file: File) -> ResponseBody {
    let stream = ReaderStream::with_capacity(file, FILE_BUFFER_SIZE);
    BodyExt::map_err(StreamBody::new(stream.map_ok(Frame::data)), Error::from).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_body_yields_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        let contents = (0..=255u8).cycle().take(FILE_BUFFER_SIZE + 17).collect::<Vec<_>>();
        std::fs::write(&path, &contents).unwrap();

        let body = from_file(File::open(&path).await.unwrap());
        let bytes = body.collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], &contents[..]);
    }
}
