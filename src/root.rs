//! The root!
//!
//! Greets whoever finds their way to the API

use crate::api::Message;
use crate::api::Success;

/// The root!
///
/// Not rate limited, not protected
///
/// Request:
/// ```sh
/// curl -v http://localhost:8000/
/// ```
///
/// Response:
/// ```json
/// { "message": "Welcome to the destinations API" }
/// ```
#[allow(clippy::unused_async)]
pub async fn root() -> Success<Message> {
    Success::ok(Message::new("Welcome to the destinations API"))
}
