//! Project display names from manifests in the working directory.

use std::fs;
use std::path::Path;

use serde::Deserialize;

const COMPOSE_FILES: &[&str] = &[
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
];

/// Project name for a working directory.
///
/// `package.json` `"name"` first, then the directory name when it is a git
/// checkout or holds a compose file.
pub fn project_display_name(working_dir: &str) -> Option<String> {
    if working_dir.is_empty() {
        return None;
    }
    let dir = Path::new(working_dir);

    name_from_package_json(dir).or_else(|| {
        let marked = dir.join(".git").is_dir()
            || COMPOSE_FILES.iter().any(|name| dir.join(name).is_file());
        marked.then(|| last_path_component(working_dir).to_string())
    })
}

fn name_from_package_json(dir: &Path) -> Option<String> {
    #[derive(Deserialize)]
    struct Manifest {
        #[serde(default)]
        name: String,
    }

    let data = fs::read_to_string(dir.join("package.json")).ok()?;
    let manifest: Manifest = serde_json::from_str(&data).ok()?;
    let name = manifest.name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn last_path_component(path: &str) -> &str {
    match path.trim_end_matches('/').rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => path,
    }
}
