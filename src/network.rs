//! Network constants for the EZID client.

/// Default EZID server base URL.
pub const DEFAULT_SERVER_URL: &str = "https://ezid.cdlib.org";

/// Version of the remote API this client speaks.
pub const API_VERSION: &str = "EZID API, Version 2";

/// Content type sent with every request.
pub const CONTENT_TYPE: &str = "text/plain; charset=UTF-8";
