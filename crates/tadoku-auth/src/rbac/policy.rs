//! Minimum-role access policy over the fixed role hierarchy.

use tadoku_entity::user::UserRole;

/// Decides whether a caller's role meets a route's minimum role.
///
/// Role hierarchy: Admin > User > Guest. The hierarchy is the closed
/// [`UserRole`] enum; there is no runtime role registration.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Creates the policy.
    pub fn new() -> Self {
        Self
    }

    /// True iff `actual` meets or exceeds `required`.
    ///
    /// A missing requirement is satisfied by anyone; an anonymous caller
    /// (`actual == None`) satisfies nothing else.
    pub fn satisfies(&self, actual: Option<UserRole>, required: Option<UserRole>) -> bool {
        match (actual, required) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(actual), Some(required)) => actual.has_at_least(&required),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_requirement_always_satisfied() {
        let policy = AccessPolicy::new();
        assert!(policy.satisfies(None, None));
        for role in UserRole::ALL {
            assert!(policy.satisfies(Some(role), None));
        }
    }

    #[test]
    fn test_anonymous_satisfies_no_role() {
        let policy = AccessPolicy::new();
        for role in UserRole::ALL {
            assert!(!policy.satisfies(None, Some(role)));
        }
    }

    #[test]
    fn test_matches_total_order() {
        let policy = AccessPolicy::new();
        for actual in UserRole::ALL {
            for required in UserRole::ALL {
                assert_eq!(
                    policy.satisfies(Some(actual), Some(required)),
                    actual >= required,
                    "{actual} vs {required}"
                );
            }
        }
    }
}
