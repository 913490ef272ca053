pub mod authority;

pub use authority::HttpAuthorityClient;
