pub mod credential;
pub mod record;
