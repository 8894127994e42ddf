/// Build details embedded by `build.rs`; any value the build could not determine reads `unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub tree_status: &'static str,
    pub built_at: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn current() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        commit: option_env!("CART_LEDGER_BUILD_HASH").unwrap_or("unknown"),
        tree_status: option_env!("CART_LEDGER_BUILD_STATUS").unwrap_or("unknown"),
        built_at: option_env!("CART_LEDGER_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("CART_LEDGER_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("CART_LEDGER_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("CART_LEDGER_BUILD_RUSTC").unwrap_or("unknown"),
    }
}

impl BuildInfo {
    /// `0.1.0 (abc1234, dirty)` style one-liner.
    pub fn summary(&self) -> String {
        if self.tree_status == "dirty" {
            format!("{} ({}, dirty)", self.version, self.commit)
        } else {
            format!("{} ({})", self.version, self.commit)
        }
    }
}
