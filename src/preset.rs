// Named glaucoma stages. Each one is a fixed (visible width, blur radius) pair:
// the field narrows and its edge softens as the disease progresses.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Extreme,
}

/// Every stage, mildest first.
pub const ALL: [Severity; 4] = [Severity::Mild, Severity::Moderate, Severity::Severe, Severity::Extreme];

impl Severity {
    /// Horizontal diameter of the clear field, pixels.
    pub const fn visible_width(self) -> u32 {
        match self {
            Severity::Mild => 425,
            Severity::Moderate => 250,
            Severity::Severe => 150,
            Severity::Extreme => 80,
        }
    }

    /// Gaussian sigma applied to the field edge, pixels.
    pub const fn blur_radius(self) -> u32 {
        match self {
            Severity::Mild => 50,
            Severity::Moderate => 100,
            Severity::Severe => 150,
            Severity::Extreme => 200,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Severity::Mild => "MILD",
            Severity::Moderate => "MODERATE",
            Severity::Severe => "SEVERE",
            Severity::Extreme => "EXTREME",
        }
    }
}

/// Resolve a level name to its `(visible_width, blur_radius)` pair.
pub fn lookup(level_name: &str) -> Result<(u32, u32), Error> {
    let s: Severity = level_name.parse()?;
    Ok((s.visible_width(), s.blur_radius()))
}

impl FromStr for Severity {
    type Err = Error;

    /// ASCII case-insensitive; anything else is `UnknownLevel`, never a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownLevel(s.to_string()))
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("MILD", (425, 50))]
    #[case("MODERATE", (250, 100))]
    #[case("SEVERE", (150, 150))]
    #[case("EXTREME", (80, 200))]
    #[case("severe", (150, 150))]
    #[case(" Mild ", (425, 50))]
    fn lookup_known_levels(#[case] name: &str, #[case] expected: (u32, u32)) {
        assert_eq!(lookup(name).unwrap(), expected);
    }

    #[rstest]
    #[case("CRITICAL")]
    #[case("")]
    #[case("MILDER")]
    fn lookup_unknown_level_fails(#[case] name: &str) {
        match lookup(name) {
            Err(Error::UnknownLevel(n)) => assert_eq!(n, name),
            other => panic!("expected UnknownLevel, got {other:?}"),
        }
    }

    #[test]
    fn field_narrows_and_softens_with_severity() {
        for pair in ALL.windows(2) {
            assert!(pair[0].visible_width() > pair[1].visible_width());
            assert!(pair[0].blur_radius() < pair[1].blur_radius());
        }
    }

    #[test]
    fn name_round_trips_through_parse() {
        for level in ALL {
            assert_eq!(level.to_string().parse::<Severity>().unwrap(), level);
        }
    }
}
