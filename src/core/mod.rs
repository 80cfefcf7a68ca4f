//! Core types and process-wide state.

mod doc;
mod state;

pub use doc::DocId;
pub use state::{
    is_serving, is_shutdown, register_server, set_serving, setup_shutdown_handler,
};
