//! Well-known application labels by port and process name.

/// Ports that carry many different servers. They never resolve by port.
const AMBIGUOUS_PORTS: &[u16] = &[80, 443, 8080, 8443, 8000, 8888, 3000, 3001, 5000, 5001, 5173, 5174];

const PORT_RULES: &[(&[u16], &str)] = &[
    // Databases
    (&[5432], "PostgreSQL"),
    (&[3306], "MySQL"),
    (&[6379], "Redis"),
    (&[27017, 27018], "Mongo"),
    (&[9200], "Elasticsearch"),
    (&[5984], "CouchDB"),
    (&[11211], "Memcached"),
    (&[9042], "Cassandra"),
    (&[1433], "SQL Server"),
    // Brokers
    (&[5672, 15672], "RabbitMQ"),
    (&[61613, 61614], "ActiveMQ"),
    (&[9092], "Kafka"),
    // Dashboards and site generators
    (&[5601], "Kibana"),
    (&[1313], "Hugo"),
    (&[2368], "Ghost"),
    // Mail
    (&[25, 465, 587], "SMTP"),
    (&[993], "IMAP"),
    (&[995], "POP3"),
    // Directory, naming, remote shell
    (&[389, 636], "LDAP"),
    (&[53], "DNS"),
    (&[22], "SSH"),
];

/// How a process-name rule matches the lowercased name.
enum Needle {
    Contains(&'static [&'static str]),
    Exact(&'static str),
    Prefix(&'static str),
    ContainsAll(&'static [&'static str]),
}

impl Needle {
    fn matches(&self, process: &str) -> bool {
        match self {
            Needle::Contains(needles) => needles.iter().any(|n| process.contains(n)),
            Needle::Exact(name) => process == *name,
            Needle::Prefix(prefix) => process.starts_with(prefix),
            Needle::ContainsAll(needles) => needles.iter().all(|n| process.contains(n)),
        }
    }
}

const PROCESS_RULES: &[(Needle, &str)] = &[
    // Databases and stores
    (Needle::Contains(&["postgres"]), "PostgreSQL"),
    (Needle::Prefix("pg_"), "PostgreSQL"),
    (Needle::Contains(&["redis"]), "Redis"),
    (Needle::Contains(&["mongo"]), "Mongo"),
    (Needle::Contains(&["mysql", "mariadb"]), "MySQL"),
    (Needle::Contains(&["elastic"]), "Elasticsearch"),
    (Needle::Contains(&["memcached"]), "Memcached"),
    (Needle::Contains(&["couchdb"]), "CouchDB"),
    // Web servers and proxies
    (Needle::Contains(&["nginx"]), "nginx"),
    (Needle::Contains(&["apache", "httpd"]), "Apache"),
    (Needle::Contains(&["caddy"]), "Caddy"),
    // Runtimes
    (Needle::Exact("node"), "Node"),
    (Needle::Prefix("node "), "Node"),
    (Needle::Contains(&["ruby"]), "Ruby"),
    (Needle::Exact("rails"), "Ruby"),
    (Needle::Contains(&["python", "uvicorn", "gunicorn"]), "Python"),
    (Needle::Contains(&["java", "gradle"]), "Java"),
    (Needle::Contains(&["dotnet"]), ".NET"),
    // Brokers
    (Needle::Contains(&["rabbitmq"]), "RabbitMQ"),
    (Needle::Contains(&["kafka"]), "Kafka"),
    // Desktop daemons and apps
    (Needle::Contains(&["sharingd"]), "AirDrop"),
    (Needle::Contains(&["rapportd"]), "Handoff"),
    (Needle::Contains(&["identity"]), "iCloud"),
    (Needle::Contains(&["replicat"]), "Replication"),
    (Needle::Contains(&["controlcenter", "controlce"]), "Control Center"),
    (Needle::ContainsAll(&["creative", "cloud"]), "Creative Cloud"),
    (Needle::Contains(&["adobe"]), "Adobe"),
    (Needle::Contains(&["cursor"]), "Cursor"),
    (Needle::ContainsAll(&["code", "visual"]), "VS Code"),
    (Needle::ContainsAll(&["code", "vs"]), "VS Code"),
    (Needle::Contains(&["ollama"]), "Ollama"),
    (Needle::Contains(&["remotepai"]), "Remote"),
];

/// Short label for a well-known application, by port first and then by
/// process name.
pub fn app_name(port: u16, process: &str) -> Option<&'static str> {
    app_by_port(port).or_else(|| app_by_process(process))
}

fn app_by_port(port: u16) -> Option<&'static str> {
    if AMBIGUOUS_PORTS.contains(&port) {
        return None;
    }
    PORT_RULES
        .iter()
        .find(|(ports, _)| ports.contains(&port))
        .map(|(_, label)| *label)
}

fn app_by_process(process: &str) -> Option<&'static str> {
    let process = process.trim().to_lowercase();
    if process.is_empty() {
        return None;
    }
    PROCESS_RULES
        .iter()
        .find(|(needle, _)| needle.matches(&process))
        .map(|(_, label)| *label)
}
