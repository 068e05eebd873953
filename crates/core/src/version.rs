//! Plugin version checks deciding container support

use regex::Regex;
use semver::Version;
use std::sync::OnceLock;

/// First liberty-maven-plugin release with container dev mode (`devc`)
pub const MAVEN_CONTAINER_VERSION: Version = Version::new(3, 3, 0);

/// First liberty-gradle-plugin release with container dev mode (`libertyDevc`)
pub const GRADLE_CONTAINER_VERSION: Version = Version::new(3, 1, 0);

/// Coerce a loosely formatted version into a semantic version.
///
/// Takes the first `MAJOR[.MINOR[.PATCH]]` run of digits and zero-fills the
/// missing parts, so `3.3` becomes `3.3.0` and `3.4.1-SNAPSHOT` becomes `3.4.1`.
pub fn coerce(text: &str) -> Option<Version> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(\d+)(?:\.(\d+))?(?:\.(\d+))?").expect("valid version regex")
    });

    let caps = re.captures(text)?;
    let part = |idx: usize| -> Option<u64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    Some(Version::new(part(1)?, part(2)?, part(3)?))
}

/// Decide container support from a declared plugin version.
///
/// An undeclared version resolves to the latest plugin release and therefore
/// supports containers. A declared version that cannot be parsed does not.
pub fn supports_container(declared: Option<&str>, threshold: &Version) -> bool {
    match declared.map(str::trim).filter(|v| !v.is_empty()) {
        None => true,
        Some(text) => match coerce(text) {
            Some(version) => version >= *threshold,
            None => {
                tracing::debug!("Unparseable plugin version '{}'", text);
                false
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce() {
        assert_eq!(coerce("3.3.0"), Some(Version::new(3, 3, 0)));
        assert_eq!(coerce("3.3"), Some(Version::new(3, 3, 0)));
        assert_eq!(coerce("3"), Some(Version::new(3, 0, 0)));
        assert_eq!(coerce("3.4.1-SNAPSHOT"), Some(Version::new(3, 4, 1)));
        assert_eq!(coerce("v3.2.0"), Some(Version::new(3, 2, 0)));
        assert_eq!(coerce("${liberty.version}"), None);
    }

    #[test]
    fn test_maven_threshold() {
        assert!(supports_container(None, &MAVEN_CONTAINER_VERSION));
        assert!(supports_container(Some(""), &MAVEN_CONTAINER_VERSION));
        assert!(!supports_container(Some("3.2.0"), &MAVEN_CONTAINER_VERSION));
        assert!(supports_container(Some("3.3.0"), &MAVEN_CONTAINER_VERSION));
        assert!(supports_container(Some("3.4.1"), &MAVEN_CONTAINER_VERSION));
        assert!(!supports_container(Some("${unresolved}"), &MAVEN_CONTAINER_VERSION));
    }

    #[test]
    fn test_gradle_threshold() {
        assert!(supports_container(Some("3.1.0"), &GRADLE_CONTAINER_VERSION));
        assert!(supports_container(Some("3.1"), &GRADLE_CONTAINER_VERSION));
        assert!(!supports_container(Some("3.0.9"), &GRADLE_CONTAINER_VERSION));
    }
}
