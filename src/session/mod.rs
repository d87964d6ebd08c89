// Public API - what other modules can use
pub use handlers::{
    create_session, delete_session, get_session, list_player_sessions, preview_export,
    update_session, upload_export,
};
pub use models::SessionModel;
pub use service::SessionService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
