// Adapters layer: concrete implementations for external systems (http, segmentation tool, session file).

pub mod http;
pub mod segmentation;
pub mod session_store;
