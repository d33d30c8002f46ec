//! Student roster model for the read-only listing screen.
//!
//! The listing screen renders a fixed in-memory collection and performs no
//! mutation, so the roster is generated deterministically instead of being
//! persisted anywhere.

/// Read-only roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Positional ID, 1-based, stable for a generated roster.
    pub id: String,
    pub name: String,
    pub age: u8,
    /// Class code in the `A1`..`E4` pattern.
    pub class_name: String,
}

/// Number of entries in the generated roster.
pub const ROSTER_SIZE: usize = 20;

/// Builds the fixed demo roster shown by the listing screen.
///
/// Generation is deterministic: class letters cycle A..E, class numbers
/// advance every five entries, ages cycle 18..22.
pub fn sample_roster() -> Vec<Student> {
    (0..ROSTER_SIZE)
        .map(|index| {
            let letter = (b'A' + (index % 5) as u8) as char;
            Student {
                id: (index + 1).to_string(),
                name: format!("Sinh viên {}", index + 1),
                age: 18 + (index % 5) as u8,
                class_name: format!("{letter}{}", index / 5 + 1),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{sample_roster, ROSTER_SIZE};
    use std::collections::HashSet;

    #[test]
    fn roster_has_expected_size_and_unique_ids() {
        let roster = sample_roster();
        assert_eq!(roster.len(), ROSTER_SIZE);

        let ids: HashSet<_> = roster.iter().map(|student| student.id.as_str()).collect();
        assert_eq!(ids.len(), ROSTER_SIZE);
    }

    #[test]
    fn roster_follows_class_and_age_pattern() {
        let roster = sample_roster();
        assert_eq!(roster[0].class_name, "A1");
        assert_eq!(roster[4].class_name, "E1");
        assert_eq!(roster[5].class_name, "A2");
        assert_eq!(roster[19].class_name, "E4");
        assert_eq!(roster[0].age, 18);
        assert_eq!(roster[6].age, 19);
        assert_eq!(roster[0].name, "Sinh viên 1");
    }

    #[test]
    fn roster_is_deterministic() {
        assert_eq!(sample_roster(), sample_roster());
    }
}
