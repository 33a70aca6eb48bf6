//! Service identification based on well-known port numbers.
//!
//! Pure, stateless lookup against a static conventional port-to-service
//! table. No network I/O; a missing entry is not an error.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Static map of well-known TCP ports to service names.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(7, "echo");
    m.insert(9, "discard");
    m.insert(13, "daytime");
    m.insert(20, "ftp-data");
    m.insert(21, "ftp");
    m.insert(22, "ssh");
    m.insert(23, "telnet");
    m.insert(25, "smtp");
    m.insert(37, "time");
    m.insert(43, "whois");
    m.insert(53, "domain");
    m.insert(70, "gopher");
    m.insert(79, "finger");
    m.insert(80, "http");
    m.insert(88, "kerberos");
    m.insert(110, "pop3");
    m.insert(111, "rpcbind");
    m.insert(113, "ident");
    m.insert(119, "nntp");
    m.insert(123, "ntp");
    m.insert(135, "msrpc");
    m.insert(139, "netbios-ssn");
    m.insert(143, "imap");
    m.insert(179, "bgp");
    m.insert(194, "irc");
    m.insert(389, "ldap");
    m.insert(443, "https");
    m.insert(445, "microsoft-ds");
    m.insert(465, "smtps");
    m.insert(513, "rlogin");
    m.insert(514, "shell");
    m.insert(515, "printer");
    m.insert(543, "klogin");
    m.insert(544, "kshell");
    m.insert(548, "afp");
    m.insert(554, "rtsp");
    m.insert(587, "submission");
    m.insert(631, "ipp");
    m.insert(636, "ldaps");
    m.insert(873, "rsync");
    m.insert(990, "ftps");
    m.insert(993, "imaps");
    m.insert(995, "pop3s");
    m.insert(1080, "socks");
    m.insert(1194, "openvpn");
    m.insert(1433, "ms-sql-s");
    m.insert(1521, "oracle");
    m.insert(1723, "pptp");
    m.insert(1883, "mqtt");
    m.insert(2049, "nfs");
    m.insert(2181, "zookeeper");
    m.insert(2375, "docker");
    m.insert(2376, "docker-s");
    m.insert(3000, "ppp");
    m.insert(3128, "squid-http");
    m.insert(3306, "mysql");
    m.insert(3389, "ms-wbt-server");
    m.insert(3690, "svn");
    m.insert(5000, "commplex-main");
    m.insert(5060, "sip");
    m.insert(5222, "xmpp-client");
    m.insert(5432, "postgresql");
    m.insert(5672, "amqp");
    m.insert(5900, "vnc");
    m.insert(5984, "couchdb");
    m.insert(6379, "redis");
    m.insert(6443, "kubernetes-api");
    m.insert(6667, "irc");
    m.insert(8000, "http-alt");
    m.insert(8008, "http-alt");
    m.insert(8080, "http-proxy");
    m.insert(8081, "http-alt");
    m.insert(8443, "https-alt");
    m.insert(8888, "http-alt");
    m.insert(9000, "cslistener");
    m.insert(9042, "cassandra");
    m.insert(9090, "websm");
    m.insert(9092, "kafka");
    m.insert(9200, "elasticsearch");
    m.insert(9418, "git");
    m.insert(10000, "webmin");
    m.insert(11211, "memcached");
    m.insert(15672, "rabbitmq-mgmt");
    m.insert(27017, "mongodb");

    m
});

/// Look up the conventional service name for a port.
///
/// Returns `None` if the port has no entry in the well-known table.
pub fn lookup(port: u16) -> Option<&'static str> {
    PORT_SERVICES.get(&port).copied()
}

/// Service name for an open port, falling back to `"Unknown"`.
pub fn service_description(port: u16) -> &'static str {
    lookup(port).unwrap_or("Unknown")
}
