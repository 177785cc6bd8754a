use crate::models::{Profile, RawPerson};

/// Cheap religion/caste pre-filter applied before a full tree comparison.
///
/// Only constructed when the caller has both fields set; a caller missing
/// either field skips pre-filtering entirely rather than failing everyone.
#[derive(Debug, Clone)]
pub struct CommunityPrefilter {
    religion: String,
    caste: String,
}

impl CommunityPrefilter {
    /// Build the pre-filter from the caller's profile, if possible.
    pub fn from_profile(profile: &Profile) -> Option<Self> {
        let religion = normalized(profile.religion.as_deref())?;
        let caste = normalized(profile.caste.as_deref())?;
        Some(Self { religion, caste })
    }

    /// A candidate survives only when both religion and caste match the
    /// caller's, using the same trim/lowercase normalization.
    pub fn accepts(&self, candidate: &Profile) -> bool {
        normalized(candidate.religion.as_deref()).as_deref() == Some(self.religion.as_str())
            && normalized(candidate.caste.as_deref()).as_deref() == Some(self.caste.as_str())
    }
}

fn normalized(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// A tree with no named individual has nothing to compare on.
pub fn has_named_person(tree: &[RawPerson]) -> bool {
    tree.iter()
        .any(|p| p.name().map(|n| !n.trim().is_empty()).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FamilyMember;

    fn profile(religion: Option<&str>, caste: Option<&str>) -> Profile {
        Profile {
            id: "user-1".to_string(),
            name: Some("Arjun".to_string()),
            email: None,
            alias_name: None,
            dob: None,
            gender: None,
            is_deceased: None,
            born_place: None,
            current_place: None,
            religion: religion.map(str::to_string),
            caste: caste.map(str::to_string),
            is_public: None,
        }
    }

    #[test]
    fn test_prefilter_requires_both_fields() {
        assert!(CommunityPrefilter::from_profile(&profile(Some("Hindu"), Some("Iyer"))).is_some());
        assert!(CommunityPrefilter::from_profile(&profile(Some("Hindu"), None)).is_none());
        assert!(CommunityPrefilter::from_profile(&profile(None, Some("Iyer"))).is_none());
        assert!(CommunityPrefilter::from_profile(&profile(Some("  "), Some("Iyer"))).is_none());
    }

    #[test]
    fn test_prefilter_matches_are_case_insensitive() {
        let prefilter = CommunityPrefilter::from_profile(&profile(Some("Hindu"), Some("Iyer"))).unwrap();
        assert!(prefilter.accepts(&profile(Some(" hindu "), Some("IYER"))));
    }

    #[test]
    fn test_prefilter_rejects_partial_match() {
        let prefilter = CommunityPrefilter::from_profile(&profile(Some("Hindu"), Some("Iyer"))).unwrap();
        assert!(!prefilter.accepts(&profile(Some("Hindu"), Some("Nair"))));
        assert!(!prefilter.accepts(&profile(Some("Hindu"), None)));
    }

    #[test]
    fn test_privacy_flag_is_ternary() {
        let mut p = profile(None, None);
        assert!(p.discoverable());
        p.is_public = Some(true);
        assert!(p.discoverable());
        p.is_public = Some(false);
        assert!(!p.discoverable());
    }

    #[test]
    fn test_has_named_person() {
        let named = vec![RawPerson::Owner(profile(None, None))];
        assert!(has_named_person(&named));

        let unnamed = vec![RawPerson::Member(FamilyMember {
            id: "m1".to_string(),
            owner_id: None,
            name: None,
            alias_name: None,
            dob: None,
            gender: None,
            is_deceased: None,
            born_place: None,
            current_place: None,
            religion: None,
            caste: None,
            relationship: None,
            father_id: None,
            mother_id: None,
            spouse_ids: vec![],
        })];
        assert!(!has_named_person(&unnamed));
        assert!(!has_named_person(&[]));
    }
}
