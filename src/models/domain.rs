use serde::{Deserialize, Serialize};

/// Tree owner's profile document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "$id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "aliasName", default)]
    pub alias_name: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "isDeceased", default)]
    pub is_deceased: Option<bool>,
    #[serde(rename = "bornPlace", default)]
    pub born_place: Option<String>,
    #[serde(rename = "currentPlace", default)]
    pub current_place: Option<String>,
    #[serde(default)]
    pub religion: Option<String>,
    #[serde(default)]
    pub caste: Option<String>,
    #[serde(rename = "isPublic", default)]
    pub is_public: Option<bool>,
}

impl Profile {
    /// Privacy flag is ternary: only an explicit `false` hides the profile.
    /// Absent or `true` both mean visible.
    pub fn discoverable(&self) -> bool {
        self.is_public != Some(false)
    }

    /// Display name shown to other users: name, falling back to email,
    /// falling back to "Unnamed User".
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("Unnamed User")
            .to_string()
    }
}

/// One family member entered by a tree owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyMember {
    #[serde(rename = "$id", alias = "id", default)]
    pub id: String,
    #[serde(rename = "ownerId", default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "aliasName", default)]
    pub alias_name: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "isDeceased", default)]
    pub is_deceased: Option<bool>,
    #[serde(rename = "bornPlace", default)]
    pub born_place: Option<String>,
    #[serde(rename = "currentPlace", default)]
    pub current_place: Option<String>,
    #[serde(default)]
    pub religion: Option<String>,
    #[serde(default)]
    pub caste: Option<String>,
    /// Relationship to the tree owner, e.g. "Father", "Spouse", "Son"
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(rename = "fatherId", default)]
    pub father_id: Option<String>,
    #[serde(rename = "motherId", default)]
    pub mother_id: Option<String>,
    #[serde(rename = "spouseIds", default)]
    pub spouse_ids: Vec<String>,
}

/// A raw tree entry before normalization. The owner's profile and family
/// member records have different shapes; this tag is resolved once at the
/// normalizer boundary so everything downstream sees one concrete type.
#[derive(Debug, Clone)]
pub enum RawPerson {
    Owner(Profile),
    Member(FamilyMember),
}

impl RawPerson {
    pub fn id(&self) -> &str {
        match self {
            RawPerson::Owner(p) => &p.id,
            RawPerson::Member(m) => &m.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            RawPerson::Owner(p) => p.name.as_deref(),
            RawPerson::Member(m) => m.name.as_deref(),
        }
    }

    pub fn alias_name(&self) -> Option<&str> {
        match self {
            RawPerson::Owner(p) => p.alias_name.as_deref(),
            RawPerson::Member(m) => m.alias_name.as_deref(),
        }
    }

    pub fn dob(&self) -> Option<&str> {
        match self {
            RawPerson::Owner(p) => p.dob.as_deref(),
            RawPerson::Member(m) => m.dob.as_deref(),
        }
    }

    pub fn gender(&self) -> Option<&str> {
        match self {
            RawPerson::Owner(p) => p.gender.as_deref(),
            RawPerson::Member(m) => m.gender.as_deref(),
        }
    }

    pub fn is_deceased(&self) -> Option<bool> {
        match self {
            RawPerson::Owner(p) => p.is_deceased,
            RawPerson::Member(m) => m.is_deceased,
        }
    }

    pub fn born_place(&self) -> Option<&str> {
        match self {
            RawPerson::Owner(p) => p.born_place.as_deref(),
            RawPerson::Member(m) => m.born_place.as_deref(),
        }
    }

    pub fn current_place(&self) -> Option<&str> {
        match self {
            RawPerson::Owner(p) => p.current_place.as_deref(),
            RawPerson::Member(m) => m.current_place.as_deref(),
        }
    }

    pub fn religion(&self) -> Option<&str> {
        match self {
            RawPerson::Owner(p) => p.religion.as_deref(),
            RawPerson::Member(m) => m.religion.as_deref(),
        }
    }

    pub fn caste(&self) -> Option<&str> {
        match self {
            RawPerson::Owner(p) => p.caste.as_deref(),
            RawPerson::Member(m) => m.caste.as_deref(),
        }
    }

    pub fn relationship(&self) -> Option<&str> {
        match self {
            RawPerson::Owner(_) => None,
            RawPerson::Member(m) => m.relationship.as_deref(),
        }
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, RawPerson::Owner(_))
    }
}

/// Matching-ready projection of a raw person record. Immutable once produced
/// by the normalizer; the untouched raw record rides along for display only.
#[derive(Debug, Clone)]
pub struct ComparablePerson {
    pub id: String,
    /// First whitespace-delimited token of the raw name, lowercased.
    /// May be empty; such persons never pass the name gate.
    pub name: String,
    pub alias_name: Option<String>,
    pub dob: Option<String>,
    pub birth_year: Option<i32>,
    pub is_deceased: bool,
    pub birth_place: Option<String>,
    pub current_place: Option<String>,
    pub religion: Option<String>,
    pub caste: Option<String>,
    /// "Self" for the tree owner, else the stored relation label or "N/A".
    pub relationship_to_owner: String,
    pub original: RawPerson,
}

impl ComparablePerson {
    /// Raw display name, "Unnamed" when missing.
    pub fn display_name(&self) -> String {
        self.original
            .name()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unnamed")
            .to_string()
    }

    /// Caller-facing detail line: DOB, deceased state, places, religion,
    /// caste and self-relative role.
    pub fn detail_line(&self) -> String {
        let mut details: Vec<String> = Vec::new();

        match self.original.dob() {
            Some("N/A") => details.push("DOB: N/A".to_string()),
            Some(dob) if !dob.is_empty() => details.push(format!("DOB: {}", dob)),
            _ => {}
        }

        details.push(if self.is_deceased { "Deceased" } else { "Alive" }.to_string());

        match self.original.born_place() {
            Some(place) if !place.is_empty() => details.push(format!("Born: {}", place)),
            _ => details.push("Born: N/A".to_string()),
        }
        if let Some(place) = self.original.current_place().filter(|p| !p.is_empty()) {
            details.push(format!("Lives: {}", place));
        }
        if let Some(religion) = self.original.religion().filter(|r| !r.is_empty()) {
            details.push(capitalize(religion));
        }
        if let Some(caste) = self.original.caste().filter(|c| !c.is_empty()) {
            details.push(capitalize(caste));
        }
        if self.relationship_to_owner != "Self" {
            details.push(format!("Role: {}", self.relationship_to_owner));
        }

        details.join(", ")
    }

    /// Sanitized projection safe to expose to another user.
    pub fn to_member_info(&self) -> MatchedMemberInfo {
        MatchedMemberInfo {
            id: self.id.clone(),
            name: self.display_name(),
            alias_name: self.original.alias_name().map(str::to_string),
            dob: self.original.dob().map(str::to_string),
            gender: self.original.gender().map(str::to_string),
            relationship_to_their_owner: self.relationship_to_owner.clone(),
            is_deceased: self.is_deceased,
            born_place: self.original.born_place().map(str::to_string),
            current_place: self.original.current_place().map(str::to_string),
            religion: self.original.religion().map(str::to_string),
            caste: self.original.caste().map(str::to_string),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Result of scoring one candidate pair
#[derive(Debug, Clone, Default)]
pub struct PairScore {
    pub score: f64,
    pub reasons: Vec<String>,
}

/// An accepted pairing of one person from each tree
#[derive(Debug, Clone)]
pub struct MatchedPair {
    pub person1: ComparablePerson,
    pub person2: ComparablePerson,
    pub pair_score: f64,
    pub reasons: Vec<String>,
}

/// Outcome of comparing two full trees
#[derive(Debug, Clone)]
pub struct TreeComparison {
    pub is_similar: bool,
    pub score: f64,
    pub contributing_pairs: Vec<MatchedPair>,
}

impl TreeComparison {
    pub fn not_similar() -> Self {
        Self {
            is_similar: false,
            score: 0.0,
            contributing_pairs: Vec::new(),
        }
    }
}

/// Sanitized person info exposed in match results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedMemberInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "aliasName")]
    pub alias_name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    #[serde(rename = "relationshipToTheirOwner")]
    pub relationship_to_their_owner: String,
    #[serde(rename = "isDeceased")]
    pub is_deceased: bool,
    #[serde(rename = "bornPlace")]
    pub born_place: Option<String>,
    #[serde(rename = "currentPlace")]
    pub current_place: Option<String>,
    pub religion: Option<String>,
    pub caste: Option<String>,
}

/// One contributing pair rendered for the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedPairDetail {
    #[serde(rename = "person1Id")]
    pub person1_id: String,
    #[serde(rename = "person1Name")]
    pub person1_name: String,
    #[serde(rename = "person1Details")]
    pub person1_details: String,
    #[serde(rename = "person2Id")]
    pub person2_id: String,
    #[serde(rename = "person2Name")]
    pub person2_name: String,
    #[serde(rename = "person2Details")]
    pub person2_details: String,
    #[serde(rename = "pairScore")]
    pub pair_score: f64,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

/// One candidate user's discovery outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedTreeResult {
    #[serde(rename = "matchedUserId")]
    pub matched_user_id: String,
    #[serde(rename = "matchedUserName")]
    pub matched_user_name: String,
    pub score: f64,
    #[serde(rename = "totalMembersInTree")]
    pub total_members_in_tree: usize,
    #[serde(rename = "detailedContributingPairs")]
    pub detailed_contributing_pairs: Vec<MatchedPairDetail>,
    #[serde(rename = "myMatchedPersons")]
    pub my_matched_persons: Vec<MatchedMemberInfo>,
    #[serde(rename = "otherMatchedPersons")]
    pub other_matched_persons: Vec<MatchedMemberInfo>,
}

/// Point values awarded per satisfied signal
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub name: f64,
    pub alias: f64,
    pub birth_year_exact: f64,
    pub birth_year_close: f64,
    pub birth_place: f64,
    pub current_place: f64,
    pub religion: f64,
    pub caste: f64,
    pub deceased: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            name: 50.0,
            alias: 30.0,
            birth_year_exact: 20.0,
            birth_year_close: 10.0,
            birth_place: 10.0,
            current_place: 10.0,
            religion: 5.0,
            caste: 5.0,
            deceased: 5.0,
        }
    }
}

/// Fixed decision thresholds for tree-level similarity
#[derive(Debug, Clone, Copy)]
pub struct MatchThresholds {
    /// Minimum pair score for a pair to be considered at all
    pub pair_minimum: f64,
    /// Minimum aggregated score for two trees to count as similar
    pub tree_minimum: f64,
    /// A single strong pair is not enough evidence of a shared family
    pub min_contributing_pairs: usize,
    /// Birth years within this many years still count as a close match
    pub birth_year_tolerance: i32,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            pair_minimum: 55.0,
            tree_minimum: 120.0,
            min_contributing_pairs: 2,
            birth_year_tolerance: 2,
        }
    }
}

/// Connection types traversed by the relationship path finder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connection {
    Parent,
    Child,
    Spouse,
    Sibling,
}

impl Connection {
    /// Generation offset of the target person relative to the source
    pub fn generation_delta(&self) -> i32 {
        match self {
            Connection::Parent => -1,
            Connection::Child => 1,
            Connection::Spouse | Connection::Sibling => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Connection::Parent => "Parent",
            Connection::Child => "Child",
            Connection::Spouse => "Spouse",
            Connection::Sibling => "Sibling",
        }
    }
}

/// One hop in a relationship path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathStep {
    #[serde(rename = "personId")]
    pub person_id: String,
    #[serde(rename = "personName")]
    pub person_name: String,
    #[serde(rename = "connectionToPrevious")]
    pub connection_to_previous: Option<String>,
    #[serde(rename = "generationRelativeToStart")]
    pub generation_relative_to_start: i32,
}

/// Result of a relationship path search within one tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindPathResult {
    #[serde(rename = "pathFound")]
    pub path_found: bool,
    pub path: Vec<PathStep>,
    #[serde(rename = "generationGap")]
    pub generation_gap: Option<i32>,
}

impl FindPathResult {
    pub fn not_found() -> Self {
        Self {
            path_found: false,
            path: Vec::new(),
            generation_gap: None,
        }
    }
}
