//! REST API endpoint implementations.

mod federation;
mod projects;
mod request;
mod url_encoding;

pub use federation::{
    create_federation, generate_invite, get_sync_stats, join_federation, start_pulsing,
    stop_pulsing,
};
pub use projects::{create_project, explore, push_data};
pub use request::send_request_with_retry;
pub use url_encoding::encode_path_segment;
