//! Base URL selection for browser-side and CLI consumers.

/// API served by a gateway running on the developer's machine.
pub const LOCAL_API_URL: &str = "http://localhost:3000";

/// Public deployment of the gateway.
pub const DEPLOYED_API_URL: &str = "https://genimage-backend.vercel.app";

/// Picks the gateway URL for a page served from `hostname`.
///
/// Pages served from `localhost` or `127.0.0.1` talk to a local gateway;
/// everything else talks to the public deployment.
#[must_use]
pub fn api_base_url(hostname: &str) -> &'static str {
    if is_local_host(hostname) {
        LOCAL_API_URL
    } else {
        DEPLOYED_API_URL
    }
}

fn is_local_host(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_hosts_use_local_api() {
        assert_eq!(api_base_url("localhost"), LOCAL_API_URL);
        assert_eq!(api_base_url("127.0.0.1"), LOCAL_API_URL);
    }

    #[test]
    fn other_hosts_use_deployed_api() {
        assert_eq!(api_base_url("genimage.example.com"), DEPLOYED_API_URL);
        assert_eq!(api_base_url("localhost.example.com"), DEPLOYED_API_URL);
        assert_eq!(api_base_url(""), DEPLOYED_API_URL);
    }
}
