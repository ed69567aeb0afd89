pub mod models {
    pub mod conversion;
}

pub mod service {
    pub mod config_service;
    pub mod converter;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
    pub mod settings;
}

pub mod facade {
    pub mod conversion_facade;
    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod utils {
    pub mod file;
    pub mod path;
    pub mod utils;
    pub mod zip;
}

pub use models::conversion::{
    ConversionError, ConversionOutput, ConversionRequest, ConversionResult, ErrorKind, ProgressEvent,
};
pub use service::converter::Converter;
pub use service::traits::i_service::{ConverterTrait, NoProgress, ProgressError, ProgressPort};
