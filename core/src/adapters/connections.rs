//! Established-connection counts per local port.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::ports::ConnectionSource;

use super::scanner::Utils;

/// Counts established TCP connections with `ss` (Linux) or `netstat` (macOS).
pub struct ConnectionScanner {
    timeout: Duration,
}

impl ConnectionScanner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl ConnectionSource for ConnectionScanner {
    async fn connection_counts(&self) -> HashMap<u16, u32> {
        #[cfg(target_os = "linux")]
        let result = super::command::run_command(
            "ss",
            &["-Htn", "state", "established"],
            self.timeout,
        )
        .await
        .map(|out| parse_ss_established(&out));

        #[cfg(target_os = "macos")]
        let result = super::command::run_command("netstat", &["-an", "-p", "tcp"], self.timeout)
            .await
            .map(|out| parse_netstat_established(&out));

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        let result: crate::error::Result<HashMap<u16, u32>> = {
            let _ = self.timeout;
            Ok(HashMap::new())
        };

        result.unwrap_or_else(|e| {
            debug!(error = %e, "Connection counts unavailable");
            HashMap::new()
        })
    }
}

/// Count `ss -Htn state established` rows per local port.
///
/// With a state filter `ss` drops the state column, so the local address is
/// the third field unless a leading `ESTAB` is present.
pub fn parse_ss_established(output: &str) -> HashMap<u16, u32> {
    let mut counts = HashMap::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let local = match fields.first() {
            Some(&"ESTAB") => fields.get(3),
            Some(_) => fields.get(2),
            None => None,
        };
        if let Some((_, port)) = local.and_then(|addr| Utils::parse_address(addr)) {
            *counts.entry(port).or_insert(0) += 1;
        }
    }

    counts
}

/// Count `netstat -an -p tcp` ESTABLISHED rows per local port.
///
/// BSD netstat separates the port with a dot: `127.0.0.1.5432`, `::1.3000`.
pub fn parse_netstat_established(output: &str) -> HashMap<u16, u32> {
    let mut counts = HashMap::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 6 || !fields[0].starts_with("tcp") || fields[5] != "ESTABLISHED" {
            continue;
        }
        let local = fields[3];
        let Some(port) = local
            .rfind('.')
            .and_then(|dot| local[dot + 1..].parse::<u16>().ok())
            .filter(|port| *port != 0)
        else {
            continue;
        };
        *counts.entry(port).or_insert(0) += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ss_established() {
        let output = "0      0      127.0.0.1:5432     127.0.0.1:40100\n\
                      0      0      127.0.0.1:5432     127.0.0.1:40102\n\
                      0      0   [::ffff:10.0.0.2]:3000  [::ffff:10.0.0.9]:51000\n\
                      ESTAB  0      0      10.0.0.2:22   10.0.0.7:60000\n\
                      \n";
        let counts = parse_ss_established(output);
        assert_eq!(counts.get(&5432), Some(&2));
        assert_eq!(counts.get(&3000), Some(&1));
        assert_eq!(counts.get(&22), Some(&1));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_parse_netstat_established() {
        let output = "Active Internet connections (including servers)\n\
                      Proto Recv-Q Send-Q  Local Address          Foreign Address        (state)\n\
                      tcp4       0      0  127.0.0.1.5432         127.0.0.1.52345        ESTABLISHED\n\
                      tcp6       0      0  ::1.3000               ::1.52346              ESTABLISHED\n\
                      tcp4       0      0  *.3000                 *.*                    LISTEN\n";
        let counts = parse_netstat_established(output);
        assert_eq!(counts.get(&5432), Some(&1));
        assert_eq!(counts.get(&3000), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_garbage_yields_no_counts() {
        assert!(parse_ss_established("nonsense\n").is_empty());
        assert!(parse_netstat_established("tcp4 0 0 nodots foreign ESTABLISHED\n").is_empty());
    }
}
