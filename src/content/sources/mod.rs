pub mod http;
pub mod local;

pub use http::HttpSource;
pub use local::FileSource;
