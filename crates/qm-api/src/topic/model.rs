use serde::Serialize;

/// One entry of the static topic catalog.
#[derive(Debug, Clone, Serialize)]
pub struct QuizTopic {
    /// Stable topic key used by question selection and analytics
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
}

/// The fixed topic catalog. Static configuration, not engine state.
pub const fn catalog() -> [QuizTopic; 6] {
    [
        QuizTopic {
            id: "python_basics",
            name: "🐍 Python Basics",
            description: "Learn Python fundamentals",
        },
        QuizTopic {
            id: "web_security",
            name: "🌐 Web Security",
            description: "Secure web development",
        },
        QuizTopic {
            id: "networking",
            name: "📡 Networking",
            description: "Network fundamentals",
        },
        QuizTopic {
            id: "linux_security",
            name: "🐧 Linux Security",
            description: "Linux hardening & security",
        },
        QuizTopic {
            id: "cryptography",
            name: "🔐 Cryptography",
            description: "Encryption & hashing",
        },
        QuizTopic {
            id: "incident_response",
            name: "🚨 Incident Response",
            description: "Handling security incidents",
        },
    ]
}

/// Whether a topic key is part of the catalog.
pub fn is_known_topic(topic: &str) -> bool {
    catalog().iter().any(|t| t.id == topic)
}

/// Convert a topic key to a plain display name ("web_security" -> "Web Security").
pub fn display_name(topic: &str) -> String {
    topic
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
