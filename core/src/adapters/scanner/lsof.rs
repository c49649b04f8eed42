//! Parser for `lsof -iTCP -sTCP:LISTEN -P -n +c 0` output.

use std::collections::HashSet;

use crate::domain::PortInfo;

use super::utils::Utils;

/// Parse lsof listening-socket output into ports, sorted by port.
pub fn parse_lsof_output(output: &str) -> Vec<PortInfo> {
    let mut ports = Vec::new();
    let mut seen: HashSet<(i32, u16)> = HashSet::new();

    for line in output.lines() {
        if !line.contains("(LISTEN)") {
            continue;
        }

        let components: Vec<&str> = line.split_whitespace().collect();
        if components.len() < 9 {
            continue;
        }

        let Ok(pid) = components[1].parse::<i32>() else {
            continue;
        };
        let process_name = decode_escapes(components[0]);

        let Some(address_part) = components[8..]
            .iter()
            .rev()
            .find(|c| c.contains(':') && !c.starts_with("0x") && !c.starts_with("0t"))
        else {
            continue;
        };

        let Some((address, port)) = Utils::parse_address(address_part) else {
            continue;
        };

        if !seen.insert((pid, port)) {
            continue;
        }

        ports.push(PortInfo::listening(port, pid, process_name, address));
    }

    ports.sort_by_key(|p| p.port);
    ports
}

/// Decode lsof's `\xNN` escapes (lsof writes spaces in names as `\x20`).
pub fn decode_escapes(name: &str) -> String {
    let bytes = name.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\'
            && i + 3 < bytes.len()
            && bytes[i + 1] == b'x'
            && bytes[i + 2].is_ascii_hexdigit()
            && bytes[i + 3].is_ascii_hexdigit()
        {
            decoded.push(hex_value(bytes[i + 2]) << 4 | hex_value(bytes[i + 3]));
            i += 4;
            continue;
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lsof_output() {
        let output = r#"COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
nginx        1  root    6u  IPv4 0x1234567890abcdef      0t0  TCP *:80 (LISTEN)
"#;

        let ports = parse_lsof_output(output);
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0].port, 80);
        assert_eq!(ports[0].bind_address, "0.0.0.0");
        assert_eq!(ports[1].port, 3000);
        assert_eq!(ports[1].pid, 34805);
        assert_eq!(ports[1].bind_address, "[::1]");
    }

    #[test]
    fn test_dedupes_dual_stack_sockets() {
        let output = r#"COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
rapportd   512  me      8u  IPv4 0xaaaaaaaaaaaaaaaa      0t0  TCP *:49152 (LISTEN)
rapportd   512  me      9u  IPv6 0xbbbbbbbbbbbbbbbb      0t0  TCP *:49152 (LISTEN)
"#;
        assert_eq!(parse_lsof_output(output).len(), 1);
    }

    #[test]
    fn test_skips_non_listen_and_malformed_lines() {
        let output = r#"COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
node     34805  code   20u  IPv4 0x1111111111111111      0t0  TCP 127.0.0.1:3000->127.0.0.1:50000 (ESTABLISHED)
node     notapid code  19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
short line (LISTEN)
"#;
        assert!(parse_lsof_output(output).is_empty());
    }

    #[test]
    fn test_decodes_escaped_names() {
        assert_eq!(decode_escapes(r"Control\x20Center"), "Control Center");
        assert_eq!(decode_escapes(r"a\x2fb"), "a/b");
        assert_eq!(decode_escapes(r"trailing\x2"), r"trailing\x2");
        assert_eq!(decode_escapes(r"bad\xzzname"), r"bad\xzzname");

        let output = "Control\\x20Center 88 me 9u IPv4 0x1 0t0 TCP *:7000 (LISTEN)\n";
        assert_eq!(parse_lsof_output(output)[0].process_name, "Control Center");
    }
}
