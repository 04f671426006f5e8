pub mod core {
    pub mod data_type;
    pub mod identifiers;
    pub mod value;
}

pub mod execution {
    pub mod connection;
}

pub mod records {
    pub mod chunk;
}
