// Adapters layer: concrete implementations of the domain ports (file sources, WHOIS over TCP, prompts).

pub mod prompt;
pub mod sources;
pub mod whois_tcp;
