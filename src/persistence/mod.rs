pub mod files;
pub mod mirror;
pub mod settings;
pub mod store;

pub use files::{
    atomic_write, ensure_dir, get_data_dir, init_data_dir_at, init_local_data_dir, log_file,
    settings_file,
};
pub use mirror::PersistenceMirror;
pub use settings::{load_settings, save_settings, Settings, MAX_MINUTES, MIN_MINUTES};
pub use store::FileStore;
