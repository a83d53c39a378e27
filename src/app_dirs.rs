use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "typeracer")
    }

    pub fn store_path() -> Option<PathBuf> {
        Self::project().map(|proj_dirs| proj_dirs.data_local_dir().join("scores.json"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::project().map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }
}
