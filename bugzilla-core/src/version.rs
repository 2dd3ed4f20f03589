//! # Server Versions
//!
//! Bugzilla reports its release as a free-form string (`"4.4.12"`, `"5.0.4.rh83"`, `"3.6rc1"`).
//! [`Version`] keeps the numeric `major.minor.patch` prefix of such a string so that the
//! capability gate can compare it against the literal thresholds registered for each command.
use std::fmt;
use std::str::FromStr;

/// A dotted numeric Bugzilla release.
///
/// Missing components are treated as zero, so `"4"`, `"4.0"` and `"4.0.0"` are all equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a Bugzilla version")]
pub struct ParseVersionError(pub String);

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            patch: 0,
        }
    }

    pub const fn with_patch(self, patch: u32) -> Self {
        Self { patch, ..self }
    }
}

impl FromStr for Version {
    type Err = ParseVersionError;

    /// Parses the leading digits of up to three dot-separated components.
    ///
    /// Parsing stops at the first component that does not start with a digit, and any
    /// suffix after the digits of a component (`rc1`, `+`, ...) is ignored. The first
    /// component must be numeric.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = [0u32; 3];
        let mut parsed = 0;

        for (slot, component) in parts.iter_mut().zip(s.trim().split('.')) {
            let digits: String = component.chars().take_while(char::is_ascii_digit).collect();
            if digits.is_empty() {
                break;
            }
            *slot = digits
                .parse()
                .map_err(|_| ParseVersionError(s.to_string()))?;
            parsed += 1;

            if digits.len() != component.len() {
                break;
            }
        }

        if parsed == 0 {
            return Err(ParseVersionError(s.to_string()));
        }

        let [major, minor, patch] = parts;
        Ok(Self {
            major,
            minor,
            patch,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}", self.major, self.minor)
        } else {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_release_strings() {
        assert_eq!("3.4".parse(), Ok(Version::new(3, 4)));
        assert_eq!("4.4.12".parse(), Ok(Version::new(4, 4).with_patch(12)));
        assert_eq!("5.0.4.rh83".parse(), Ok(Version::new(5, 0).with_patch(4)));
        assert_eq!("3.6rc1".parse(), Ok(Version::new(3, 6)));
        assert_eq!(" 4 ".parse(), Ok(Version::new(4, 0)));
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert!("".parse::<Version>().is_err());
        assert!("tip".parse::<Version>().is_err());
    }

    #[test]
    fn orders_numerically_not_lexicographically() {
        let ten: Version = "10.0".parse().unwrap();
        assert!(ten > Version::new(4, 0));
        assert!(Version::new(3, 4) < Version::new(3, 6));
        assert!(Version::new(3, 4).with_patch(1) > Version::new(3, 4));
        assert_eq!(Version::new(4, 0), "4.0.0".parse().unwrap());
    }

    #[test]
    fn displays_without_zero_patch() {
        assert_eq!(Version::new(3, 2).to_string(), "3.2");
        assert_eq!(Version::new(4, 4).with_patch(12).to_string(), "4.4.12");
    }
}
