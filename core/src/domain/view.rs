//! Filtering and sorting of a port snapshot into the displayed view.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PortInfo;
use crate::error::Error;

/// Column the port table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Port number, ascending.
    #[default]
    Port,
    /// Uptime, shortest first. Unknown start times count as zero.
    Uptime,
    /// Process name, case-insensitive.
    Process,
}

impl SortKey {
    /// All sort keys in cycling order.
    pub const ALL: [SortKey; 3] = [SortKey::Port, SortKey::Uptime, SortKey::Process];

    /// The key after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            SortKey::Port => SortKey::Uptime,
            SortKey::Uptime => SortKey::Process,
            SortKey::Process => SortKey::Port,
        }
    }

    /// Column title for this key.
    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Port => "Port",
            SortKey::Uptime => "Uptime",
            SortKey::Process => "Process",
        }
    }

    /// Compare two ports under this key.
    pub fn compare(&self, a: &PortInfo, b: &PortInfo, now: DateTime<Utc>) -> Ordering {
        match self {
            SortKey::Port => a.port.cmp(&b.port),
            SortKey::Uptime => a.uptime(now).cmp(&b.uptime(now)),
            SortKey::Process => a
                .process_name
                .to_lowercase()
                .cmp(&b.process_name.to_lowercase()),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "port" => Ok(SortKey::Port),
            "uptime" => Ok(SortKey::Uptime),
            "process" => Ok(SortKey::Process),
            other => Err(Error::ParseError(format!("unknown sort key: {other}"))),
        }
    }
}

/// Keep the ports matching a search query, preserving order.
pub fn filter_ports(ports: &[PortInfo], query: &str) -> Vec<PortInfo> {
    ports
        .iter()
        .filter(|p| p.matches_search(query))
        .cloned()
        .collect()
}

/// Stable sort of ports by the given key.
pub fn sort_ports(ports: &mut [PortInfo], key: SortKey, now: DateTime<Utc>) {
    ports.sort_by(|a, b| key.compare(a, b, now));
}

/// Filter then sort a snapshot into the list the user sees.
pub fn derive_view(
    snapshot: &[PortInfo],
    query: &str,
    key: SortKey,
    now: DateTime<Utc>,
) -> Vec<PortInfo> {
    let mut view = filter_ports(snapshot, query);
    sort_ports(&mut view, key, now);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn sample() -> Vec<PortInfo> {
        let mut node = PortInfo::listening(3000, 10, "node", "*");
        node.start_time = Some(now() - chrono::Duration::minutes(5));
        node.working_dir = "/home/dev/shop".to_string();
        node.framework = "Next.js".to_string();

        let mut postgres = PortInfo::listening(5432, 20, "postgres", "127.0.0.1");
        postgres.start_time = Some(now() - chrono::Duration::days(3));

        let nginx = PortInfo::listening(80, 30, "Nginx", "*");

        let mut ruby = PortInfo::listening(3001, 40, "ruby", "*");
        ruby.start_time = Some(now() - chrono::Duration::minutes(5));
        ruby.framework = "Rails".to_string();

        vec![node, postgres, nginx, ruby]
    }

    fn ports_of(list: &[PortInfo]) -> Vec<u16> {
        list.iter().map(|p| p.port).collect()
    }

    #[test]
    fn test_sort_key_cycle() {
        assert_eq!(SortKey::Port.next(), SortKey::Uptime);
        assert_eq!(SortKey::Uptime.next(), SortKey::Process);
        assert_eq!(SortKey::Process.next(), SortKey::Port);
        assert_eq!("Uptime".parse::<SortKey>().ok(), Some(SortKey::Uptime));
        assert!(matches!("pid".parse::<SortKey>(), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let ports = sample();
        assert_eq!(filter_ports(&ports, ""), ports);
        assert_eq!(filter_ports(&ports, "   "), ports);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let ports = sample();
        for query in ["", "30", "NODE", "rails", "shop", "nothing-matches"] {
            let once = filter_ports(&ports, query);
            let twice = filter_ports(&once, query);
            assert_eq!(once, twice, "query {query:?}");
        }
    }

    #[test]
    fn test_filter_matches_port_and_labels() {
        let ports = sample();
        assert_eq!(ports_of(&filter_ports(&ports, "300")), vec![3000, 3001]);
        assert_eq!(ports_of(&filter_ports(&ports, "next")), vec![3000]);
        assert_eq!(ports_of(&filter_ports(&ports, "nginx")), vec![80]);
    }

    #[test]
    fn test_sort_by_port() {
        let mut ports = sample();
        sort_ports(&mut ports, SortKey::Port, now());
        assert_eq!(ports_of(&ports), vec![80, 3000, 3001, 5432]);
    }

    #[test]
    fn test_sort_by_uptime_treats_unknown_as_zero() {
        let mut ports = sample();
        sort_ports(&mut ports, SortKey::Uptime, now());
        // nginx has no start time, node and ruby tie (stable), postgres is oldest.
        assert_eq!(ports_of(&ports), vec![80, 3000, 3001, 5432]);
    }

    #[test]
    fn test_sort_by_process_is_case_insensitive() {
        let mut ports = sample();
        sort_ports(&mut ports, SortKey::Process, now());
        assert_eq!(ports_of(&ports), vec![80, 3000, 5432, 3001]);
    }

    #[test]
    fn test_sort_is_total_and_stable() {
        for key in SortKey::ALL {
            let mut once = sample();
            sort_ports(&mut once, key, now());
            for pair in once.windows(2) {
                assert_ne!(key.compare(&pair[0], &pair[1], now()), Ordering::Greater);
            }
            let mut twice = once.clone();
            sort_ports(&mut twice, key, now());
            assert_eq!(once, twice, "key {key}");
        }
    }

    #[test]
    fn test_derive_view_filters_before_sorting() {
        let ports = sample();
        let view = derive_view(&ports, "300", SortKey::Process, now());
        assert_eq!(ports_of(&view), vec![3000, 3001]);
    }
}
