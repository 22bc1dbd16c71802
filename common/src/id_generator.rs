use rand::Rng;

use crate::SessionId;

const ADJECTIVES: &[&str] = &[
    "Swift", "Brave", "Clever", "Mighty", "Silent", "Golden", "Wild", "Noble",
    "Fierce", "Gentle", "Quick", "Wise", "Bold", "Proud", "Cunning", "Sly",
];

const NOUNS: &[&str] = &[
    "Falcon", "Bear", "Tiger", "Wolf", "Eagle", "Dragon", "Lion", "Panther",
    "Hawk", "Fox", "Raven", "Cobra", "Shark", "Phoenix", "Lynx", "Viper",
];

pub fn generate_session_id() -> SessionId {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    SessionId::new(format!("{}-{}", adjective, noun))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_is_adjective_dash_noun() {
        let id = generate_session_id();
        let (adjective, noun) = id.as_str().split_once('-').unwrap();

        assert!(ADJECTIVES.contains(&adjective));
        assert!(NOUNS.contains(&noun));
    }
}
