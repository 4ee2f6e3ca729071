pub mod url;

pub use url::{CreateUrlRequest, LinkRecord, ShortenResponse, UrlInfoResponse};
