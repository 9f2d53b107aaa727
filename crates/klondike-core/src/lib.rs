#![deny(warnings)]
pub mod game;
pub mod model;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "mdklondike"
    }

    pub const fn codename() -> &'static str {
        "Patience Engine"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "mdklondike");
        assert_eq!(AppInfo::codename(), "Patience Engine");
        assert!(!AppInfo::version().is_empty());
    }
}
