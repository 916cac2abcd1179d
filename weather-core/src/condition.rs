/// Coarse weather category derived from a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Clear,
    Clouds,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

impl Condition {
    /// Codes outside the known table fall back to `Clouds`.
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 | 1 => Condition::Clear,
            2 | 3 => Condition::Clouds,
            45 | 48 => Condition::Fog,
            51 | 53 | 55 | 56 | 57 => Condition::Drizzle,
            61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => Condition::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => Condition::Snow,
            95 | 96 | 99 => Condition::Thunderstorm,
            _ => Condition::Clouds,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::Clouds => "Clouds",
            Condition::Fog => "Fog",
            Condition::Drizzle => "Drizzle",
            Condition::Rain => "Rain",
            Condition::Snow => "Snow",
            Condition::Thunderstorm => "Thunderstorm",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label written to the `weather` column. A missing code gives an empty cell.
pub fn condition_label(code: Option<i64>) -> &'static str {
    code.map(Condition::from_code).map_or("", |c| c.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_codes_map_to_their_labels() {
        let table: &[(&[i64], &str)] = &[
            (&[0, 1], "Clear"),
            (&[2, 3], "Clouds"),
            (&[45, 48], "Fog"),
            (&[51, 53, 55, 56, 57], "Drizzle"),
            (&[61, 63, 65, 66, 67, 80, 81, 82], "Rain"),
            (&[71, 73, 75, 77, 85, 86], "Snow"),
            (&[95, 96, 99], "Thunderstorm"),
        ];

        for (codes, label) in table {
            for code in *codes {
                assert_eq!(condition_label(Some(*code)), *label, "code {code}");
            }
        }
    }

    #[test]
    fn unknown_codes_default_to_clouds() {
        for code in [4, 44, 52, 70, 79, 90, 100, -1, i64::MAX] {
            assert_eq!(Condition::from_code(code), Condition::Clouds, "code {code}");
        }
    }

    #[test]
    fn missing_code_is_empty_label() {
        assert_eq!(condition_label(None), "");
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(Condition::Thunderstorm.to_string(), "Thunderstorm");
    }
}
