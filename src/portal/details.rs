//! Static detail tables behind the feature cards and timeline entries.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureDetails {
    pub name: &'static str,
    pub components: &'static [&'static str],
    pub metrics: &'static [(&'static str, &'static str)],
    pub next_steps: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineDetails {
    pub title: &'static str,
    pub user_stories: u32,
    pub story_points: u32,
    pub deliverables: &'static [&'static str],
}

static FEATURES: [FeatureDetails; 3] = [
    FeatureDetails {
        name: "Core Combat Engine",
        components: &["CombatEngine.java", "TargetSelector.java", "CombatStyleManager.java"],
        metrics: &[
            ("linesOfCode", "1250"),
            ("testCoverage", "95%"),
            ("performance", "Excellent"),
        ],
        next_steps: &["Weapon type expansion", "Special attack optimization"],
    },
    FeatureDetails {
        name: "Anti-Detection System",
        components: &["AntiBanManager.java", "BehaviorPattern.java", "RandomizationEngine.java"],
        metrics: &[
            ("detectionRate", "<0.1%"),
            ("behaviorVariations", "150"),
            ("adaptability", "High"),
        ],
        next_steps: &["Machine learning integration", "Advanced pattern recognition"],
    },
    FeatureDetails {
        name: "Task Management",
        components: &["TaskManager.java", "StateManager.java", "TaskQueue.java"],
        metrics: &[
            ("taskEfficiency", "98%"),
            ("errorRecovery", "99.5%"),
            ("concurrency", "Thread-safe"),
        ],
        next_steps: &["Priority algorithms", "Dynamic task allocation"],
    },
];

static TIMELINE: [TimelineDetails; 2] = [
    TimelineDetails {
        title: "Phase 1: Foundation & Core Architecture",
        user_stories: 7,
        story_points: 34,
        deliverables: &[
            "Modular project structure",
            "Core combat engine",
            "NPC targeting system",
            "State management",
            "Anti-ban foundation",
            "Configuration system",
            "Enhanced logging",
        ],
    },
    TimelineDetails {
        title: "Phase 2: User Interface & Essential Features",
        user_stories: 8,
        story_points: 50,
        deliverables: &[
            "Modern GUI framework",
            "Weapon type support",
            "Banking integration",
            "Multi-target management",
            "Real-time overlays",
            "Configuration panels",
        ],
    },
];

pub fn feature_details(name: &str) -> Option<&'static FeatureDetails> {
    FEATURES.iter().find(|f| f.name == name)
}

/// Timeline titles on the page carry a status marker ("✅ ", "🔄 ") in front
/// of the phase name; it is ignored for the lookup.
pub fn timeline_details(title: &str) -> Option<&'static TimelineDetails> {
    let bare = title.find("Phase").map(|i| &title[i..]).unwrap_or(title).trim();
    TIMELINE.iter().find(|t| t.title == bare)
}
