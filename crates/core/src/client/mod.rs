pub mod detect_client;
pub mod detect_response;
pub mod media_selection;
