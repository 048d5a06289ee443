pub mod detect;
pub mod error;
pub mod proxy;
pub mod types;

pub use detect::{detect, CLOUDFLARE_SERVER_SIGNATURE};
pub use error::CheckError;
pub use proxy::{format_target_url, HeaderProxyClient};
