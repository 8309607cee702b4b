use snafu::Snafu;

use super::*;

/// Canonical flight identifier: uppercase ASCII letters and digits only.
///
/// Built through [FlightId::normalize], which accepts free-form user input, or through
/// [FromStr](std::str::FromStr), which additionally rejects input that normalizes to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FlightId(String);

impl FlightId {
    /// Trim, uppercase and drop everything outside `[A-Z0-9]`.
    pub fn normalize(input: &str) -> Option<FlightId> {
        let id: String = input
            .trim()
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .filter(char::is_ascii_alphanumeric)
            .collect();

        (!id.is_empty()).then_some(FlightId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for FlightId {
    type Err = ParseFlightId;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        FlightId::normalize(input).ok_or_else(|| ParseFlightId::new(input.to_string()))
    }
}

impl TryFrom<String> for FlightId {
    type Error = ParseFlightId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FlightId> for String {
    fn from(id: FlightId) -> Self {
        id.0
    }
}

impl std::fmt::Display for FlightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::convert::AsRef<str> for FlightId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Snafu, new)]
#[snafu(display("Failed to parse flight id: {:?}", text))]
pub struct ParseFlightId {
    pub text: String,
}
