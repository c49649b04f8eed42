//! Database product names for well-known database ports.

const DATABASE_PORTS: &[(u16, &str)] = &[
    (5432, "PostgreSQL"),
    (3306, "MySQL"),
    (6379, "Redis"),
    (27017, "Mongo"),
    (9200, "Elasticsearch"),
];

/// Product name for a well-known database port.
pub fn database_product(port: u16) -> Option<&'static str> {
    DATABASE_PORTS
        .iter()
        .find(|(p, _)| *p == port)
        .map(|(_, name)| *name)
}

/// Whether the port belongs to a known database.
pub fn is_database_port(port: u16) -> bool {
    database_product(port).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_product() {
        assert_eq!(database_product(5432), Some("PostgreSQL"));
        assert_eq!(database_product(6379), Some("Redis"));
        assert_eq!(database_product(9200), Some("Elasticsearch"));
        assert_eq!(database_product(3000), None);
        assert!(is_database_port(27017));
        assert!(!is_database_port(27018));
    }
}
