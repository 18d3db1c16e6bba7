pub mod server;

/// Actions the CLI can dispatch to
#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        upstream_url: String,
        secure_cookies: bool,
    },
}
