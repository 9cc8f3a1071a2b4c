pub mod api;
pub mod api_doc;
pub mod server;
pub mod state;
pub mod ui;

pub use server::{build_router, run_server, serve, ServerError};
pub use state::AppState;
