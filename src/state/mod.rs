mod persistence;
mod session;

pub use persistence::SettingsSnapshot;
pub use session::EditorSession;
