//! PhishGuard core: pure state machine and view-model helpers.
mod effect;
mod history;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use history::{excerpt, filter_history, record, EXCERPT_CHARS, HISTORY_LIMIT};
pub use msg::Msg;
pub use state::{AppState, RequestId, INVALID_URL_MESSAGE};
pub use update::update;
pub use validate::is_valid_url;
pub use view_model::{AppViewModel, HistoryRowView, Tone};
