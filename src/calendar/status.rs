use serde::Serialize;

/// Whether the location is operating on a given day.
///
/// Serializes to the wire vocabulary: `"on"`, `"off"` or `"undefined"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum BusinessStatus {
    #[serde(rename = "on")]
    Open,
    #[serde(rename = "off")]
    Closed,
    #[serde(rename = "undefined")]
    Undefined,
}

impl BusinessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessStatus::Open => "on",
            BusinessStatus::Closed => "off",
            BusinessStatus::Undefined => "undefined",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_wire_vocabulary() {
        for status in [
            BusinessStatus::Open,
            BusinessStatus::Closed,
            BusinessStatus::Undefined,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }
}
