pub struct Utils;

impl Utils {
    /// Parse an address:port string.
    ///
    /// Handles multiple address formats:
    /// - IPv4: "127.0.0.1:3000" or "*:8080"
    /// - IPv6: "\[::1]:3000" or "\[fe80::1]:8080"
    /// - Scoped: "127.0.0.53%lo:53" or "\[fe80::1]%eth0:22"
    ///
    /// Returns `None` unless the port is in `1..=65535`.
    pub fn parse_address(address: &str) -> Option<(String, u16)> {
        let (addr, port_str) = if address.starts_with('[') {
            // IPv6 format: [::1]:3000 or [fe80::1]%eth0:22
            let bracket_end = address.find(']')?;
            let rest = &address[bracket_end + 1..];
            let colon = rest.find(':')?;
            let scope = &rest[..colon];
            if !scope.is_empty() && !scope.starts_with('%') {
                return None;
            }
            (
                &address[..=bracket_end + colon],
                &rest[colon + 1..],
            )
        } else {
            // IPv4 format: 127.0.0.1:3000 or *:8080
            let last_colon = address.rfind(':')?;
            let addr = &address[..last_colon];
            let addr = if addr.is_empty() { "*" } else { addr };
            (addr, &address[last_colon + 1..])
        };

        let port: u16 = port_str.parse().ok()?;
        if port == 0 {
            return None;
        }
        Some((addr.to_string(), port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipv4_address() {
        let (addr, port) = Utils::parse_address("127.0.0.1:3000").unwrap();
        assert_eq!(addr, "127.0.0.1");
        assert_eq!(port, 3000);

        let (addr, port) = Utils::parse_address("*:8080").unwrap();
        assert_eq!(addr, "*");
        assert_eq!(port, 8080);

        let (addr, port) = Utils::parse_address("127.0.0.53%lo:53").unwrap();
        assert_eq!(addr, "127.0.0.53%lo");
        assert_eq!(port, 53);
    }

    #[test]
    fn test_parse_ipv6_address() {
        let (addr, port) = Utils::parse_address("[::1]:3000").unwrap();
        assert_eq!(addr, "[::1]");
        assert_eq!(port, 3000);

        let (addr, port) = Utils::parse_address("[fe80::1]:8080").unwrap();
        assert_eq!(addr, "[fe80::1]");
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_scoped_ipv6_address() {
        let (addr, port) = Utils::parse_address("[fe80::1]%eth0:22").unwrap();
        assert_eq!(addr, "[fe80::1]%eth0");
        assert_eq!(port, 22);

        assert!(Utils::parse_address("[fe80::1]%eth0").is_none());
        assert!(Utils::parse_address("[fe80::1]x:22").is_none());
    }

    #[test]
    fn test_rejects_out_of_range_ports() {
        assert!(Utils::parse_address("*:0").is_none());
        assert!(Utils::parse_address("*:65536").is_none());
        assert!(Utils::parse_address("*:-1").is_none());
        assert!(Utils::parse_address("*:*").is_none());
        assert!(Utils::parse_address("[::1]").is_none());
        assert!(Utils::parse_address("localhost").is_none());
        assert!(Utils::parse_address("*:65535").is_some());
    }
}
