use crate::models::{Connection, FindPathResult, PathStep, RawPerson};
use std::collections::{HashMap, HashSet, VecDeque};

/// Find the chain of relations connecting two people in one user's tree.
///
/// Breadth-first search over typed parent/child/spouse/sibling edges, so
/// the first path found is a shortest one. Edges come from two sources:
/// explicit link fields on family members (`fatherId`, `motherId`,
/// `spouseIds`) and the owner-relative relationship labels ("Father",
/// "Son", "Spouse", ...), which anchor every labelled member to the owner.
pub fn find_relationship_path(
    person1_id: &str,
    person2_id: &str,
    tree: &[RawPerson],
) -> FindPathResult {
    let people: HashMap<&str, &RawPerson> = tree.iter().map(|p| (p.id(), p)).collect();
    if !people.contains_key(person1_id) || !people.contains_key(person2_id) {
        return FindPathResult::not_found();
    }
    if person1_id == person2_id {
        return FindPathResult::not_found();
    }

    let adjacency = build_adjacency(tree);

    // BFS frontier; predecessor map rebuilds the path afterwards.
    let mut queue: VecDeque<&str> = VecDeque::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut came_from: HashMap<&str, (&str, Connection)> = HashMap::new();

    queue.push_back(person1_id);
    visited.insert(person1_id);

    let mut found = false;
    while let Some(current) = queue.pop_front() {
        if current == person2_id {
            found = true;
            break;
        }
        if let Some(neighbors) = adjacency.get(current) {
            for (next, connection) in neighbors {
                if visited.insert(next.as_str()) {
                    came_from.insert(next, (current, *connection));
                    queue.push_back(next);
                }
            }
        }
    }

    if !found {
        return FindPathResult::not_found();
    }

    // Walk back from the target, then reverse into start-to-target order.
    let mut hops: Vec<(&str, Option<Connection>)> = Vec::new();
    let mut cursor = person2_id;
    while cursor != person1_id {
        let (previous, connection) = came_from[cursor];
        hops.push((cursor, Some(connection)));
        cursor = previous;
    }
    hops.push((person1_id, None));
    hops.reverse();

    let mut generation = 0;
    let path: Vec<PathStep> = hops
        .into_iter()
        .map(|(id, connection)| {
            if let Some(c) = connection {
                generation += c.generation_delta();
            }
            PathStep {
                person_id: id.to_string(),
                person_name: display_name(people[id]),
                connection_to_previous: connection.map(|c| c.label().to_string()),
                generation_relative_to_start: generation,
            }
        })
        .collect();

    let generation_gap = path.last().map(|step| step.generation_relative_to_start);

    FindPathResult {
        path_found: true,
        path,
        generation_gap,
    }
}

fn display_name(person: &RawPerson) -> String {
    person
        .name()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("Unnamed")
        .to_string()
}

/// Typed adjacency with both edge directions materialized.
fn build_adjacency(tree: &[RawPerson]) -> HashMap<String, Vec<(String, Connection)>> {
    let ids: HashSet<&str> = tree.iter().map(|p| p.id()).collect();
    let owner_id = tree.iter().find(|p| p.is_owner()).map(|p| p.id().to_string());

    let mut adjacency: HashMap<String, Vec<(String, Connection)>> = HashMap::new();
    let mut add_edge = |from: &str, to: &str, connection: Connection| {
        adjacency
            .entry(from.to_string())
            .or_default()
            .push((to.to_string(), connection));
    };

    for person in tree {
        let RawPerson::Member(member) = person else { continue };

        // Explicit link fields
        for parent_id in [member.father_id.as_deref(), member.mother_id.as_deref()]
            .into_iter()
            .flatten()
        {
            if ids.contains(parent_id) {
                add_edge(&member.id, parent_id, Connection::Parent);
                add_edge(parent_id, &member.id, Connection::Child);
            }
        }
        for spouse_id in &member.spouse_ids {
            if ids.contains(spouse_id.as_str()) {
                add_edge(&member.id, spouse_id, Connection::Spouse);
                add_edge(spouse_id, &member.id, Connection::Spouse);
            }
        }

        // Owner-relative labels anchor the member to the owner node
        let (Some(owner_id), Some(label)) = (owner_id.as_deref(), member.relationship.as_deref())
        else {
            continue;
        };
        match label {
            "Father" | "Mother" => {
                add_edge(owner_id, &member.id, Connection::Parent);
                add_edge(&member.id, owner_id, Connection::Child);
            }
            "Son" | "Daughter" => {
                add_edge(owner_id, &member.id, Connection::Child);
                add_edge(&member.id, owner_id, Connection::Parent);
            }
            "Spouse" => {
                add_edge(owner_id, &member.id, Connection::Spouse);
                add_edge(&member.id, owner_id, Connection::Spouse);
            }
            "Brother" | "Sister" => {
                add_edge(owner_id, &member.id, Connection::Sibling);
                add_edge(&member.id, owner_id, Connection::Sibling);
            }
            _ => {}
        }
    }

    adjacency
}
