pub mod record;

pub use record::PostgresRecordRepository;
