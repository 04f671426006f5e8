pub mod error;
pub mod ingest;
pub mod table_state;
pub mod verify;

pub mod execution {
    pub mod executor;
}
