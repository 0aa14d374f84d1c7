//! Notification sinks for fare alerts.
//!
//! Two delivery channels: a chat webhook (JSON POST) and an email API
//! (SendGrid-style mail-send). Both accept finished text; all fare logic and
//! message composition stays upstream of the sinks.

mod chat;
mod email;
mod error;
mod message;

pub use chat::ChatNotifier;
pub use email::EmailNotifier;
pub use error::NotifyError;
pub use message::{deal_alert, no_data, no_deal};
