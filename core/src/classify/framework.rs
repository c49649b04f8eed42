//! Framework detection from the command line and project files.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Command-line phrases, matched against the space-joined base names of the
/// command's tokens, so `/app/node_modules/.bin/next dev` reads `next dev`.
const COMMAND_RULES: &[(&str, &str)] = &[
    ("next dev", "Next.js"),
    ("next start", "Next.js"),
    ("vite", "Vite"),
    ("rails server", "Rails"),
    ("rails s", "Rails"),
    ("manage.py runserver", "Django"),
    ("uvicorn", "Uvicorn"),
    ("gunicorn", "Gunicorn"),
    ("hypercorn", "Hypercorn"),
    ("daphne", "Daphne"),
];

/// `package.json` dependency names. A trailing `/` matches a whole scope.
const DEPENDENCY_RULES: &[(&str, &str)] = &[
    ("next", "Next.js"),
    ("nuxt", "Nuxt"),
    ("@sveltejs/kit", "SvelteKit"),
    ("astro", "Astro"),
    ("@remix-run/", "Remix"),
    ("vite", "Vite"),
];

/// Python manifest mentions, checked in order.
const PYTHON_RULES: &[(&str, &str)] = &[
    ("django", "Django"),
    ("fastapi", "FastAPI"),
    ("flask", "Flask"),
];

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    #[serde(default)]
    dependencies: HashMap<String, serde_json::Value>,
    #[serde(default)]
    dev_dependencies: HashMap<String, serde_json::Value>,
    #[serde(default)]
    scripts: BTreeMap<String, serde_json::Value>,
}

/// Detect a framework label for a process.
///
/// Command-line rules win over project files, which win over the bare
/// runtime. Returns `None` when nothing matches.
pub fn detect_framework(working_dir: &str, command: &str, process: &str) -> Option<&'static str> {
    from_command(command)
        .or_else(|| from_project_files(working_dir))
        .or_else(|| from_process(process))
}

fn from_command(command: &str) -> Option<&'static str> {
    let lower = command.to_lowercase();
    if lower.contains("bin/rails") {
        return Some("Rails");
    }

    let words = lower
        .split_whitespace()
        .map(|token| token.rsplit('/').next().unwrap_or(token))
        .collect::<Vec<_>>()
        .join(" ");
    let padded = format!(" {words} ");

    COMMAND_RULES
        .iter()
        .find(|(phrase, _)| padded.contains(&format!(" {phrase} ")))
        .map(|(_, label)| *label)
}

fn from_project_files(working_dir: &str) -> Option<&'static str> {
    if working_dir.is_empty() {
        return None;
    }
    let dir = Path::new(working_dir);

    from_package_json(dir)
        .or_else(|| from_gemfile(dir))
        .or_else(|| dir.join("manage.py").is_file().then_some("Django"))
        .or_else(|| from_python_manifests(dir))
        .or_else(|| dir.join("go.mod").is_file().then_some("Go"))
}

fn from_package_json(dir: &Path) -> Option<&'static str> {
    let data = fs::read_to_string(dir.join("package.json")).ok()?;
    let pkg: PackageJson = serde_json::from_str(&data).ok()?;

    let has_dependency = |rule: &str| {
        pkg.dependencies
            .keys()
            .chain(pkg.dev_dependencies.keys())
            .any(|name| {
                if rule.ends_with('/') {
                    name.starts_with(rule)
                } else {
                    name == rule
                }
            })
    };
    if let Some((_, label)) = DEPENDENCY_RULES.iter().find(|(rule, _)| has_dependency(*rule)) {
        return Some(*label);
    }

    for script in pkg.scripts.values().filter_map(|v| v.as_str()) {
        let script = script.to_lowercase();
        if script.contains("next") && (script.contains("dev") || script.contains("start")) {
            return Some("Next.js");
        }
        if script.contains("vite") {
            return Some("Vite");
        }
    }

    Some("Node")
}

fn from_gemfile(dir: &Path) -> Option<&'static str> {
    let gemfile = fs::read_to_string(dir.join("Gemfile")).ok()?;
    gemfile.to_lowercase().contains("rails").then_some("Rails")
}

fn from_python_manifests(dir: &Path) -> Option<&'static str> {
    let manifests: Vec<String> = ["requirements.txt", "pyproject.toml"]
        .iter()
        .filter_map(|name| fs::read_to_string(dir.join(name)).ok())
        .map(|contents| contents.to_lowercase())
        .collect();
    if manifests.is_empty() {
        return None;
    }

    PYTHON_RULES
        .iter()
        .find(|(needle, _)| manifests.iter().any(|m| m.contains(needle)))
        .map(|(_, label)| *label)
        .or(Some("Python"))
}

fn from_process(process: &str) -> Option<&'static str> {
    (process.trim().to_lowercase() == "node").then_some("Node")
}
