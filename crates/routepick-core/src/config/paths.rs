//! Config path resolution helpers.

use std::path::{Path, PathBuf};

use super::ConfigScope;

pub const CONFIG_FILE_NAME: &str = "routepick.toml";

pub fn config_path_for_scope(scope: ConfigScope, global_dir: &Path, project_root: &Path) -> PathBuf {
    match scope {
        ConfigScope::Global => global_dir.join(CONFIG_FILE_NAME),
        ConfigScope::Project => project_root.join(CONFIG_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_resolve_to_their_directories() {
        let global = Path::new("/home/u/.config/routepick");
        let project = Path::new("/work/plan");

        assert_eq!(
            config_path_for_scope(ConfigScope::Global, global, project),
            global.join("routepick.toml")
        );
        assert_eq!(
            config_path_for_scope(ConfigScope::Project, global, project),
            project.join("routepick.toml")
        );
    }
}
