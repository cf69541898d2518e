//! Random fixture data for IAM policies
//!
//! Generated values have a fixed shape and random content:
//! - strings: `randomString-<n><m>`
//! - roles: `<base>-<n>-<m>`
//! - members: `<principal>-<n>-<m>@<domain>`
//!
//! A seeded generator always produces the same sequence.

use super::{Binding, Policy};
use crate::config::GeneratorConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Exclusive upper bound for the numeric suffixes in generated strings
const SUFFIX_BOUND: u32 = 99_999;

/// Exclusive upper bound for the first number in a generated id sequence
const START_NUMBER_BOUND: u32 = 9_999;

/// Random policy, binding and identifier generator
#[derive(Debug, Clone)]
pub struct PolicyGenerator {
    rng: StdRng,
    config: GeneratorConfig,
}

impl PolicyGenerator {
    /// Generator with default ranges, seeded from entropy
    pub fn new() -> Self {
        Self::from_config(GeneratorConfig::default())
    }

    /// Generator with default ranges and a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::from_config(GeneratorConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    /// Generator using the ranges and seed from `config`
    ///
    /// The config is expected to be validated; inverted ranges are clamped.
    pub fn from_config(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        PolicyGenerator { rng, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn suffix(&mut self) -> u32 {
        self.rng.gen_range(0..SUFFIX_BOUND)
    }

    /// Random string for use as a role or principal base
    pub fn random_string(&mut self) -> String {
        let (a, b) = (self.suffix(), self.suffix());
        format!("randomString-{}{}", a, b)
    }

    /// Random role derived from `base`
    pub fn role(&mut self, base: &str) -> String {
        let (a, b) = (self.suffix(), self.suffix());
        format!("{}-{}-{}", base, a, b)
    }

    /// Random email-shaped member derived from `principal`
    pub fn member(&mut self, principal: &str) -> String {
        let (a, b) = (self.suffix(), self.suffix());
        format!("{}-{}-{}@{}", principal, a, b, self.config.member_domain)
    }

    /// Random binding with a random role and member count in the configured range
    pub fn binding(&mut self) -> Binding {
        let base = self.random_string();
        let role = self.role(&base);

        let (lo, hi) = ordered(self.config.min_members, self.config.max_members);
        let count = self.rng.gen_range(lo..=hi);

        let members: Vec<String> = (0..count)
            .map(|_| {
                let principal = self.random_string();
                self.member(&principal)
            })
            .collect();

        Binding::new(role, members)
    }

    /// Exactly `count` random bindings
    pub fn bindings(&mut self, count: usize) -> Vec<Binding> {
        (0..count).map(|_| self.binding()).collect()
    }

    /// Random policy with a binding count in the configured range
    pub fn policy(&mut self) -> Policy {
        let (lo, hi) = ordered(self.config.min_bindings, self.config.max_bindings);
        let count = self.rng.gen_range(lo..=hi);
        Policy::new(self.bindings(count))
    }

    /// Policy from `bindings`, or a random one when none are supplied
    pub fn policy_with(&mut self, bindings: Option<Vec<Binding>>) -> Policy {
        match bindings {
            Some(bindings) => Policy::new(bindings),
            None => self.policy(),
        }
    }

    /// First number of a generated identifier sequence
    pub fn start_number(&mut self) -> u32 {
        self.rng.gen_range(0..START_NUMBER_BOUND)
    }
}

impl Default for PolicyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_shapes() {
        let mut gen = PolicyGenerator::seeded(1);

        let s = gen.random_string();
        assert!(s.starts_with("randomString-"));
        assert!(s["randomString-".len()..].chars().all(|c| c.is_ascii_digit()));

        let role = gen.role("roles/custom");
        let parts: Vec<&str> = role.rsplitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2], "roles/custom");
        assert!(parts[0].parse::<u32>().unwrap() < SUFFIX_BOUND);

        let member = gen.member("alice");
        assert!(member.starts_with("alice-"));
        assert!(member.ends_with("@testdomain.co"));
        assert_eq!(member.matches('@').count(), 1);
    }

    #[test]
    fn test_binding_member_range() {
        let mut gen = PolicyGenerator::seeded(2);
        for _ in 0..200 {
            let binding = gen.binding();
            assert!((1..=10).contains(&binding.members.len()));
            assert!(binding.role.starts_with("randomString-"));
        }
    }

    #[test]
    fn test_policy_binding_range() {
        let mut gen = PolicyGenerator::seeded(3);
        for _ in 0..100 {
            let policy = gen.policy();
            assert!((10..=19).contains(&policy.bindings.len()));
        }
    }

    #[test]
    fn test_bindings_exact_count() {
        let mut gen = PolicyGenerator::seeded(4);
        assert_eq!(gen.bindings(0).len(), 0);
        assert_eq!(gen.bindings(7).len(), 7);
    }

    #[test]
    fn test_policy_with_supplied_bindings() {
        let mut gen = PolicyGenerator::seeded(5);
        let bindings = vec![Binding::new("roles/viewer", ["user:a@example.com"])];
        let policy = gen.policy_with(Some(bindings.clone()));
        assert_eq!(policy.bindings, bindings);

        assert!(!gen.policy_with(None).is_empty());
    }

    #[test]
    fn test_seeded_generators_are_deterministic() {
        let mut a = PolicyGenerator::seeded(42);
        let mut b = PolicyGenerator::seeded(42);
        assert_eq!(a.policy(), b.policy());
        assert_eq!(a.start_number(), b.start_number());

        let mut c = PolicyGenerator::seeded(43);
        assert_ne!(a.policy(), c.policy());
    }

    #[test]
    fn test_custom_config() {
        let mut gen = PolicyGenerator::from_config(GeneratorConfig {
            seed: Some(9),
            min_bindings: 0,
            max_bindings: 2,
            min_members: 3,
            max_members: 3,
            member_domain: "example.org".to_string(),
        });

        for _ in 0..50 {
            let policy = gen.policy();
            assert!(policy.bindings.len() <= 2);
            for binding in &policy.bindings {
                assert_eq!(binding.members.len(), 3);
                assert!(binding.members.iter().all(|m| m.ends_with("@example.org")));
            }
        }
    }

    #[test]
    fn test_start_number_bound() {
        let mut gen = PolicyGenerator::seeded(6);
        for _ in 0..1000 {
            assert!(gen.start_number() < START_NUMBER_BOUND);
        }
    }
}
