//! Launch environment detection from the command line.

/// Package managers and launchers, matched on the first token's base name.
const LAUNCHERS: &[&str] = &[
    "npm", "npx", "yarn", "pnpm", "bun", "poetry", "pipenv", "uv", "cargo", "bundle",
];

/// Runtimes, matched after stripping a version suffix (`python3.12`, `node20`).
const RUNTIMES: &[&str] = &["python", "node", "ruby", "java", "deno", "php"];

/// How a process was launched, e.g. `npm`, `go`, `python`.
pub fn launch_environment(command: &str) -> Option<&'static str> {
    let mut tokens = command.split_whitespace();
    let first = tokens.next()?;
    let base = first.rsplit('/').next().unwrap_or(first);

    if base == "go" {
        return (tokens.next() == Some("run")).then_some("go");
    }
    if let Some(launcher) = LAUNCHERS.iter().find(|l| **l == base) {
        return Some(*launcher);
    }

    let unversioned = base.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
    RUNTIMES.iter().find(|r| **r == unversioned).copied()
}
