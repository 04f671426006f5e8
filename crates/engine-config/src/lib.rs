pub mod error;

pub mod settings {
    pub mod connection;
    pub mod disposition;
    pub mod validated;
}
