pub mod peer_ip_resolver;
