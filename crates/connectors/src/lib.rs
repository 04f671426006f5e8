pub mod aws {
    pub mod config;
}

pub mod file {
    pub mod csv {
        pub mod error;
        pub mod infer;
        pub mod metadata;
        pub mod source;
    }
}

pub mod secrets {
    pub mod error;
    pub mod provider;
}

pub mod sql {
    pub mod base {
        pub mod error;
        pub mod store;
    }

    pub mod mysql {
        pub mod adapter;
        pub mod params;
        pub mod query;
    }
}

pub mod storage {
    pub mod error;
    pub mod s3;
}

pub mod tls {
    pub mod ca_bundle;
}
