// Integration tests for Kin Algo

use kin_algo::core::find_relationship_path;
use kin_algo::{
    normalize_person, ComparablePerson, FamilyMember, Profile, RawPerson, TreeMatcher,
};

fn owner(id: &str, name: &str) -> Profile {
    Profile {
        id: id.to_string(),
        name: Some(name.to_string()),
        email: None,
        alias_name: None,
        dob: Some("1985-06-20".to_string()),
        gender: None,
        is_deceased: Some(false),
        born_place: Some("Chennai, India".to_string()),
        current_place: None,
        religion: Some("Hindu".to_string()),
        caste: Some("Iyer".to_string()),
        is_public: None,
    }
}

fn member(
    id: &str,
    name: &str,
    dob: Option<&str>,
    born_place: Option<&str>,
    relationship: Option<&str>,
) -> FamilyMember {
    FamilyMember {
        id: id.to_string(),
        owner_id: None,
        name: Some(name.to_string()),
        alias_name: None,
        dob: dob.map(str::to_string),
        gender: None,
        is_deceased: Some(false),
        born_place: born_place.map(str::to_string),
        current_place: None,
        religion: Some("Hindu".to_string()),
        caste: Some("Iyer".to_string()),
        relationship: relationship.map(str::to_string),
        father_id: None,
        mother_id: None,
        spouse_ids: vec![],
    }
}

fn normalize_tree(owner_profile: Profile, members: Vec<FamilyMember>) -> Vec<ComparablePerson> {
    let mut raw = vec![RawPerson::Owner(owner_profile)];
    raw.extend(members.into_iter().map(RawPerson::Member));
    raw.iter().map(normalize_person).collect()
}

#[test]
fn test_integration_siblings_entering_the_same_family() {
    // Two siblings who each entered their shared parents and grandfather
    // independently, with small spelling and date differences.
    let matcher = TreeMatcher::with_defaults();

    let my_tree = normalize_tree(
        owner("user-a", "Arjun Sharma"),
        vec![
            member("a-f", "Rajesh Sharma", Some("1950-03-14"), Some("Chennai, India"), Some("Father")),
            member("a-m", "Meena Sharma", Some("1955-08-02"), Some("Madurai, India"), Some("Mother")),
            member("a-gf", "Krishnan Sharma", Some("1925-01-01"), Some("Thanjavur, India"), None),
        ],
    );

    let sibling_tree = normalize_tree(
        owner("user-b", "Priya Sharma"),
        vec![
            member("b-f", "Rajesh Kumar Sharma", Some("1950-03-14"), Some("Chennai, India"), Some("Father")),
            member("b-m", "Meena", Some("1956-08-02"), Some("Madurai, India"), Some("Mother")),
            member("b-gf", "Krishnan", Some("1925-01-01"), Some("Thanjavur, India"), None),
        ],
    );

    let result = matcher.compare(&my_tree, &sibling_tree);
    assert!(result.is_similar, "independently-entered shared family should match");
    assert!(result.contributing_pairs.len() >= 3);

    // Every accepted pair carries human-readable evidence
    for pair in &result.contributing_pairs {
        assert!(!pair.reasons.is_empty());
        assert!(pair.pair_score >= matcher.thresholds().pair_minimum);
    }
}

#[test]
fn test_integration_common_first_name_is_not_family() {
    // Strangers who happen to share one very common first name
    let matcher = TreeMatcher::with_defaults();

    let my_tree = normalize_tree(
        owner("user-a", "Arjun"),
        vec![member("a-f", "Kumar", Some("1950-01-01"), Some("Chennai, India"), Some("Father"))],
    );
    let stranger_tree = normalize_tree(
        owner("user-b", "Deepak"),
        vec![member("b-x", "Kumar", Some("1912-01-01"), Some("Delhi, India"), None)],
    );

    let result = matcher.compare(&my_tree, &stranger_tree);
    assert!(!result.is_similar);
}

#[test]
fn test_integration_score_equals_pair_sum_and_is_symmetric() {
    let matcher = TreeMatcher::with_defaults();

    let tree_a = normalize_tree(
        owner("user-a", "Arjun"),
        vec![
            member("a-f", "Rajesh", Some("1950-03-14"), Some("Chennai, India"), Some("Father")),
            member("a-m", "Meena", Some("1955-08-02"), Some("Madurai, India"), Some("Mother")),
        ],
    );
    let tree_b = normalize_tree(
        owner("user-b", "Priya"),
        vec![
            member("b-f", "Rajesh", Some("1950-03-14"), Some("Chennai, India"), Some("Father")),
            member("b-m", "Meena", Some("1955-08-02"), Some("Madurai, India"), Some("Mother")),
        ],
    );

    let forward = matcher.compare(&tree_a, &tree_b);
    let backward = matcher.compare(&tree_b, &tree_a);

    let sum: f64 = forward.contributing_pairs.iter().map(|p| p.pair_score).sum();
    assert!((forward.score - sum).abs() < f64::EPSILON);
    assert_eq!(forward.score, backward.score);
    assert_eq!(forward.is_similar, backward.is_similar);
}

#[test]
fn test_integration_relationship_path_through_tree() {
    // self -> father -> grandfather, using owner labels plus explicit links
    let mut father = member("father", "Rajesh", None, None, Some("Father"));
    father.father_id = Some("grandfather".to_string());

    let tree = vec![
        RawPerson::Owner(owner("self", "Arjun")),
        RawPerson::Member(father),
        RawPerson::Member(member("grandfather", "Krishnan", None, None, None)),
    ];

    let result = find_relationship_path("self", "grandfather", &tree);
    assert!(result.path_found);
    assert_eq!(result.path.len(), 3);
    assert_eq!(result.generation_gap, Some(-2));
    assert_eq!(result.path[0].person_name, "Arjun");
    assert_eq!(result.path[2].person_name, "Krishnan");
}

#[test]
fn test_integration_match_result_wire_format() {
    // Responses must use the camelCase field names clients already consume
    let info = normalize_person(&RawPerson::Owner(owner("user-a", "Arjun"))).to_member_info();
    let json = serde_json::to_value(&info).unwrap();

    assert!(json.get("relationshipToTheirOwner").is_some());
    assert!(json.get("isDeceased").is_some());
    assert!(json.get("bornPlace").is_some());
    assert!(json.get("relationship_to_their_owner").is_none());
}
