mod manager;
mod persistence;

pub use manager::UserStateManager;
pub use persistence::{StateFile, UserRecord, load_state, save_state};
