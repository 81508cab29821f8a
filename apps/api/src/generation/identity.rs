//! Identity overwrite for fabricated résumés.
//!
//! The model is asked for a distinct name per résumé but often repeats itself, so after
//! normalization the batch replaces name, email and phone. Names come from fixed tables indexed
//! by the item position; contact details are random.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::resume::ResumeRecord;

/// Initial letters handed to the model as a name hint, cycled by item index.
pub const NAME_HINT_LETTERS: [char; 20] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'R', 'S', 'T', 'V', 'W',
    'Z',
];

const EMAIL_DOMAINS: [&str; 5] = [
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "protonmail.com",
];

#[rustfmt::skip]
const FIRST_NAMES: [&str; 96] = [
    "James", "Mary", "Robert", "Patricia", "Michael", "Jennifer", "William", "Linda",
    "David", "Elizabeth", "Richard", "Barbara", "Joseph", "Susan", "Thomas", "Jessica",
    "Charles", "Sarah", "Christopher", "Karen", "Daniel", "Nancy", "Matthew", "Lisa",
    "Anthony", "Betty", "Mark", "Margaret", "Donald", "Sandra", "Steven", "Ashley",
    "Paul", "Kimberly", "Andrew", "Emily", "Joshua", "Donna", "Kenneth", "Michelle",
    "Kevin", "Carol", "Brian", "Amanda", "George", "Dorothy", "Timothy", "Melissa",
    "Ronald", "Deborah", "Edward", "Stephanie", "Jason", "Rebecca", "Jeffrey", "Sharon",
    "Ryan", "Laura", "Jacob", "Cynthia", "Gary", "Kathleen", "Nicholas", "Amy",
    "Eric", "Angela", "Jonathan", "Shirley", "Stephen", "Anna", "Larry", "Brenda",
    "Justin", "Pamela", "Scott", "Emma", "Brandon", "Nicole", "Benjamin", "Helen",
    "Samuel", "Samantha", "Raymond", "Katherine", "Gregory", "Christine", "Alexander", "Debra",
    "Patrick", "Rachel", "Frank", "Carolyn", "Dennis", "Janet", "Jerry", "Catherine",
];

#[rustfmt::skip]
const LAST_NAMES: [&str; 96] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas",
    "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
    "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young",
    "Allen", "King", "Wright", "Scott", "Torres", "Nguyen", "Hill", "Flores",
    "Green", "Adams", "Nelson", "Baker", "Hall", "Rivera", "Campbell", "Mitchell",
    "Carter", "Roberts", "Gomez", "Phillips", "Evans", "Turner", "Diaz", "Parker",
    "Cruz", "Edwards", "Collins", "Reyes", "Stewart", "Morris", "Morales", "Murphy",
    "Cook", "Rogers", "Gutierrez", "Ortiz", "Morgan", "Cooper", "Peterson", "Bailey",
    "Reed", "Kelly", "Howard", "Ramos", "Kim", "Cox", "Ward", "Richardson",
    "Watson", "Brooks", "Chavez", "Wood", "James", "Bennett", "Gray", "Mendoza",
    "Ruiz", "Hughes", "Price", "Alvarez", "Castillo", "Sanders", "Patel", "Myers",
];

pub fn name_hint(index: usize) -> char {
    NAME_HINT_LETTERS[index % NAME_HINT_LETTERS.len()]
}

/// Deterministic display name for batch item `index`. The last-name stride of 7 keeps first and
/// last names from advancing in lockstep.
pub fn unique_name(index: usize) -> String {
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last = LAST_NAMES[(index * 7) % LAST_NAMES.len()];
    format!("{first} {last}")
}

pub fn fake_email<R: Rng + ?Sized>(name: &str, rng: &mut R) -> String {
    let local = name.to_lowercase().replace(' ', ".");
    let number = rng.gen_range(10..=99);
    let domain = EMAIL_DOMAINS.choose(rng).copied().unwrap_or(EMAIL_DOMAINS[0]);
    format!("{local}{number}@{domain}")
}

pub fn fake_phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "+1-{}-{}-{}",
        rng.gen_range(200..=999),
        rng.gen_range(200..=999),
        rng.gen_range(1000..=9999)
    )
}

/// Replaces name, email and phone on a freshly normalized record.
pub fn assign_identity<R: Rng + ?Sized>(record: &mut ResumeRecord, index: usize, rng: &mut R) {
    let name = unique_name(index);
    record.email = Some(fake_email(&name, rng));
    record.phone = Some(fake_phone(rng));
    record.name = Some(name);
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_unique_name_is_deterministic_per_index() {
        assert_eq!(unique_name(0), "James Smith");
        assert_eq!(unique_name(1), "Mary Davis");
        assert_eq!(unique_name(1), unique_name(1));
    }

    #[test]
    fn test_first_forty_names_are_distinct() {
        let mut names: Vec<String> = (0..40).map(unique_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 40);
    }

    #[test]
    fn test_name_hint_cycles() {
        assert_eq!(name_hint(0), 'A');
        assert_eq!(name_hint(8), 'J');
        assert_eq!(name_hint(20), 'A');
    }

    #[test]
    fn test_fake_email_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let email = fake_email("Mary Davis", &mut rng);
        let (local, domain) = email.split_once('@').unwrap();
        assert!(local.starts_with("mary.davis"));
        let number: u32 = local["mary.davis".len()..].parse().unwrap();
        assert!((10..=99).contains(&number));
        assert!(EMAIL_DOMAINS.contains(&domain));
    }

    #[test]
    fn test_fake_phone_shape() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let phone = fake_phone(&mut rng);
            let groups: Vec<&str> = phone.trim_start_matches("+1-").split('-').collect();
            assert_eq!(groups.len(), 3);
            let area: u32 = groups[0].parse().unwrap();
            let line: u32 = groups[2].parse().unwrap();
            assert!((200..=999).contains(&area));
            assert!((1000..=9999).contains(&line));
        }
    }

    #[test]
    fn test_assign_identity_overwrites_model_output() {
        let mut record = ResumeRecord {
            name: Some("Model Chosen".to_string()),
            email: None,
            phone: Some("555".to_string()),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assign_identity(&mut record, 2, &mut rng);

        assert_eq!(record.name.as_deref(), Some("Robert Anderson"));
        assert!(record.email.unwrap().starts_with("robert.anderson"));
        assert!(record.phone.unwrap().starts_with("+1-"));
    }
}
