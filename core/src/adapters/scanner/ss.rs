//! Parser for `ss -Htlnp` output.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::PortInfo;

use super::utils::Utils;

/// Matches one `("name",pid=N,fd=N)` owner inside the `users:(...)` column.
fn users_regex() -> &'static Regex {
    static USERS: OnceLock<Regex> = OnceLock::new();
    USERS.get_or_init(|| {
        Regex::new(r#"\("((?:[^"\\]|\\.)*)",pid=(\d+),fd=\d+\)"#).expect("valid users regex")
    })
}

/// Parse `ss -Htlnp` output into listening ports.
///
/// A socket shared by several processes yields one record per PID. Sockets
/// whose owner is hidden (no `users:` column without root) get PID 0.
pub fn parse_ss_output(output: &str) -> Vec<PortInfo> {
    let mut ports = Vec::new();
    let mut seen: HashSet<(i32, u16)> = HashSet::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 || fields[0] != "LISTEN" {
            continue;
        }

        let Some((address, port)) = Utils::parse_address(fields[3]) else {
            continue;
        };

        let mut owners: Vec<(String, i32)> = users_regex()
            .captures_iter(line)
            .filter_map(|caps| Some((caps[1].to_string(), caps[2].parse().ok()?)))
            .collect();
        if owners.is_empty() {
            owners.push((String::new(), 0));
        }

        for (process_name, pid) in owners {
            if !seen.insert((pid, port)) {
                continue;
            }
            ports.push(PortInfo::listening(port, pid, process_name, address.clone()));
        }
    }

    ports.sort_by_key(|p| p.port);
    ports
}
