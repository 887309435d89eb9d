//! Shared HTTP building blocks: MIME inference and response builders.

pub mod mime;
pub mod response;

pub use response::{
    build_404_response, build_405_response, build_413_response, build_500_response,
    build_file_response, build_options_response, build_redirect_response,
};
