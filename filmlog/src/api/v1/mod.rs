pub mod camera;
pub mod journal;
pub mod project;
pub mod roll;

/// Header carrying the ID of the user a request is made for.
///
/// It is trusted as-is and must be set by an authenticating proxy.
pub const FILMLOG_OWNER: &str = "x-filmlog-owner";
