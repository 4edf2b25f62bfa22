use serde::Deserialize;

/// One roster entry. Identity is the hh.ru employer id, which the API
/// returns as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employer {
    pub id: String,
    pub name: String,
}

/// An employer as returned by the employer-search endpoint. The payload
/// carries more fields; only id and name survive into the roster.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployerHit {
    pub id: String,
    pub name: String,
}

/// Append the search hit whose id matches `id` to the roster.
/// Returns true if a hit was found and added.
pub fn add_by_id(roster: &mut Vec<Employer>, hits: &[EmployerHit], id: &str) -> bool {
    match hits.iter().find(|hit| hit.id == id) {
        Some(hit) => {
            roster.push(Employer {
                id: hit.id.clone(),
                name: hit.name.clone(),
            });
            true
        }
        None => false,
    }
}

/// Drop the roster entry with the given id. Returns true if one was removed.
pub fn remove_by_id(roster: &mut Vec<Employer>, id: &str) -> bool {
    let before = roster.len();
    roster.retain(|employer| employer.id != id);
    roster.len() < before
}
