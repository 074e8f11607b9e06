//! Skill categories.
//!
//! The ruleset knows three categories. Anything else a sheet sends us,
//! including no category at all, is grouped under [`SkillCategory::Other`].

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(from = "Option<String>", into = "String")]
pub enum SkillCategory {
    /// Acting: physical and practical skills
    Handeln,
    /// Knowing: education and lore
    Wissen,
    /// Social: dealing with people
    Soziales,
    #[default]
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Handeln,
        SkillCategory::Wissen,
        SkillCategory::Soziales,
        SkillCategory::Other,
    ];

    /// Normalize a free-text label. Matching is exact after trimming, as
    /// the labels are stored verbatim on the sheet.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some("Handeln") => Self::Handeln,
            Some("Wissen") => Self::Wissen,
            Some("Soziales") => Self::Soziales,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Handeln => "Handeln",
            Self::Wissen => "Wissen",
            Self::Soziales => "Soziales",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Option<String>> for SkillCategory {
    fn from(value: Option<String>) -> Self {
        Self::from_label(value.as_deref())
    }
}

impl From<SkillCategory> for String {
    fn from(value: SkillCategory) -> Self {
        value.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_their_category() {
        assert_eq!(SkillCategory::from_label(Some("Handeln")), SkillCategory::Handeln);
        assert_eq!(SkillCategory::from_label(Some(" Wissen ")), SkillCategory::Wissen);
        assert_eq!(SkillCategory::from_label(Some("Soziales")), SkillCategory::Soziales);
    }

    #[test]
    fn unknown_or_missing_labels_fall_into_other() {
        assert_eq!(SkillCategory::from_label(Some("Mystic")), SkillCategory::Other);
        assert_eq!(SkillCategory::from_label(Some("")), SkillCategory::Other);
        assert_eq!(SkillCategory::from_label(None), SkillCategory::Other);
    }

    #[test]
    fn deserializes_null_and_unknown_as_other() {
        let parsed: Vec<SkillCategory> =
            serde_json::from_str(r#"["Wissen", null, "Mystic"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![SkillCategory::Wissen, SkillCategory::Other, SkillCategory::Other]
        );
    }
}
