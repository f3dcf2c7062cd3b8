pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod pipeline;
pub mod profiler;
pub mod serializer;
pub mod storage;
pub mod tasks;
pub mod transformer;
pub mod types;
pub mod validator;
