//! Remediation roadmap.
//!
//! Rank order is list order. Priority is fixed per slot and is not derived
//! from impact.

use crate::domain::{CategoryScores, Impact, Priority, RepositoryProfile, RoadmapItem};

type Predicate = fn(&RepositoryProfile, &CategoryScores) -> bool;

#[derive(Debug, Clone, Copy)]
struct Recommendation {
    title: &'static str,
    description: &'static str,
}

struct RoadmapSlot {
    priority: Priority,
    impact: Impact,
    branches: &'static [(Predicate, Recommendation)],
    fallback: Recommendation,
}

impl RoadmapSlot {
    fn item(&self, profile: &RepositoryProfile, scores: &CategoryScores) -> RoadmapItem {
        let recommendation = self
            .branches
            .iter()
            .find(|(predicate, _)| predicate(profile, scores))
            .map(|(_, recommendation)| *recommendation)
            .unwrap_or(self.fallback);
        RoadmapItem {
            priority: self.priority,
            title: recommendation.title.to_string(),
            description: recommendation.description.to_string(),
            impact: self.impact,
        }
    }
}

fn is_licensed(profile: &RepositoryProfile, _: &CategoryScores) -> bool {
    profile.has_license
}

const SLOTS: [RoadmapSlot; 5] = [
    RoadmapSlot {
        priority: Priority::High,
        impact: Impact::High,
        branches: &[(
            is_licensed,
            Recommendation {
                title: "Enhance Documentation",
                description: "Create comprehensive API documentation and usage examples to help new contributors",
            },
        )],
        fallback: Recommendation {
            title: "Add License",
            description: "Add an appropriate open-source license (MIT, Apache 2.0, or GPL)",
        },
    },
    RoadmapSlot {
        priority: Priority::High,
        impact: Impact::High,
        branches: &[],
        fallback: Recommendation {
            title: "Implement Automated Testing",
            description: "Set up continuous integration with GitHub Actions and increase test coverage to 80%+",
        },
    },
    RoadmapSlot {
        priority: Priority::Medium,
        impact: Impact::Medium,
        branches: &[],
        fallback: Recommendation {
            title: "Community Guidelines",
            description: "Add CODE_OF_CONDUCT.md and CONTRIBUTING.md to encourage community participation",
        },
    },
    // Medium priority with high impact is intentional.
    RoadmapSlot {
        priority: Priority::Medium,
        impact: Impact::High,
        branches: &[],
        fallback: Recommendation {
            title: "Security Scanning",
            description: "Enable Dependabot and add security scanning for vulnerabilities",
        },
    },
    RoadmapSlot {
        priority: Priority::Low,
        impact: Impact::Medium,
        branches: &[],
        fallback: Recommendation {
            title: "Performance Optimization",
            description: "Profile code and optimize critical paths for better performance",
        },
    },
];

/// Build the ordered roadmap for a profile.
pub fn roadmap(profile: &RepositoryProfile, scores: &CategoryScores) -> Vec<RoadmapItem> {
    SLOTS
        .iter()
        .map(|slot| slot.item(profile, scores))
        .collect()
}
