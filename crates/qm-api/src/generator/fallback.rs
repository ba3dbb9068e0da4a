//! Canned question content used when AI generation is unavailable.
//!
//! The catalog is keyed by topic; an unrecognized topic falls back to
//! [`DEFAULT_TOPIC`]. Content is deterministic so the quiz flow stays
//! usable without an API key and tests can rely on it.

use qm_db::models::QuestionOption;

use super::{FreeTextQuestion, McqQuestion};

/// Topic served when the requested one has no fallback entry.
pub const DEFAULT_TOPIC: &str = "python_basics";

fn options(texts: [&str; 4]) -> Vec<QuestionOption> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| QuestionOption {
            id: i as i32 + 1,
            text: (*text).to_string(),
        })
        .collect()
}

fn mcq_entry(
    question: &str,
    option_texts: [&str; 4],
    correct_option_id: i32,
    explanation: &str,
) -> McqQuestion {
    let options = options(option_texts);
    let answer = options
        .iter()
        .find(|o| o.id == correct_option_id)
        .map(|o| o.text.clone())
        .unwrap_or_default();
    McqQuestion {
        question: question.to_string(),
        options,
        correct_option_id,
        answer,
        explanation: explanation.to_string(),
    }
}

/// Fallback multiple-choice question for a topic.
pub fn mcq(topic: &str) -> McqQuestion {
    match topic {
        "web_security" => mcq_entry(
            "What does CSRF stand for?",
            [
                "Cross-Site Request Forgery",
                "Cross-Server File Response",
                "Cryptographic Security Request Format",
                "Central Site Resource Filter",
            ],
            1,
            "CSRF (Cross-Site Request Forgery) is a security vulnerability where an attacker tricks a user into performing unwanted actions on another website.",
        ),
        "networking" => mcq_entry(
            "Which layer of the OSI model is responsible for routing?",
            [
                "Layer 2 - Data Link",
                "Layer 3 - Network",
                "Layer 4 - Transport",
                "Layer 5 - Session",
            ],
            2,
            "The Network layer (Layer 3) is responsible for routing packets between networks using IP addresses.",
        ),
        "linux_security" => mcq_entry(
            "What is the chmod value for read, write, execute for owner (7)?",
            ["4 + 2 + 1", "2 + 1 + 4", "4 + 1 + 2", "All of the above"],
            4,
            "The chmod value 7 represents read (4) + write (2) + execute (1) permissions. All options show the same permissions in different order.",
        ),
        "cryptography" => mcq_entry(
            "Which algorithm is most commonly used for symmetric encryption?",
            ["RSA", "AES", "SHA-256", "ECDSA"],
            2,
            "AES (Advanced Encryption Standard) is the most widely used symmetric encryption algorithm. RSA and ECDSA are asymmetric, and SHA-256 is a hash function.",
        ),
        "incident_response" => mcq_entry(
            "What is the first step in incident response?",
            ["Detection", "Analysis", "Remediation", "Recovery"],
            1,
            "Detection is the first phase of incident response where security tools and monitoring systems identify security incidents.",
        ),
        // python_basics, and any topic without an entry
        _ => python_basics_mcq(),
    }
}

fn python_basics_mcq() -> McqQuestion {
    mcq_entry(
        "What is the correct way to create a list in Python?",
        [
            "my_list = [1, 2, 3, 4]",
            "my_list = (1, 2, 3, 4)",
            "my_list = {1, 2, 3, 4}",
            "my_list = <1, 2, 3, 4>",
        ],
        1,
        "Lists in Python are created using square brackets []. Parentheses () create tuples, curly braces {} create sets, and angle brackets <> are not used for collections.",
    )
}

fn free_text_entry(question: &str, answer: &str, explanation: &str) -> FreeTextQuestion {
    FreeTextQuestion {
        question: question.to_string(),
        answer: answer.to_string(),
        explanation: explanation.to_string(),
    }
}

/// Fallback free-text question for a topic.
pub fn free_text(topic: &str) -> FreeTextQuestion {
    match topic {
        "web_security" => free_text_entry(
            "What is SQL injection and how is it prevented?",
            "An attack inserting malicious SQL through user input; prevented with parameterized queries and input validation",
            "SQL injection exploits string-built queries. Parameterized queries keep data separate from SQL code, which removes the attack surface.",
        ),
        "networking" => free_text_entry(
            "What is the difference between TCP and UDP?",
            "TCP is connection-oriented and reliable with ordered delivery; UDP is connectionless, faster, and without delivery guarantees",
            "TCP handshakes, acknowledges, and retransmits; UDP simply sends datagrams, trading reliability for latency.",
        ),
        "linux_security" => free_text_entry(
            "Why should services not run as root?",
            "A compromised service running as root gives the attacker full system control; least privilege limits the damage",
            "Running services under dedicated unprivileged accounts contains a compromise to what that account can touch.",
        ),
        "cryptography" => free_text_entry(
            "What is the difference between symmetric and asymmetric encryption?",
            "Symmetric uses one shared key for both directions; asymmetric uses a public/private key pair",
            "Symmetric ciphers like AES are fast but need a shared secret; asymmetric schemes like RSA solve key distribution at a performance cost.",
        ),
        "incident_response" => free_text_entry(
            "What are the main phases of incident response?",
            "Detection, analysis, containment, eradication, recovery, and lessons learned",
            "The phases form a cycle: identify the incident, understand it, stop the spread, remove the cause, restore service, and feed findings back into preparation.",
        ),
        _ => free_text_entry(
            "What is the difference between a list and a tuple in Python?",
            "Lists are mutable and tuples are immutable",
            "Lists can be modified after creation while tuples cannot, which makes tuples usable as dictionary keys and safer to share.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPICS: [&str; 6] = [
        "python_basics",
        "web_security",
        "networking",
        "linux_security",
        "cryptography",
        "incident_response",
    ];

    #[test]
    fn test_every_topic_has_a_well_formed_mcq() {
        for topic in TOPICS {
            let question = mcq(topic);
            assert_eq!(question.options.len(), 4, "topic {topic}");
            assert!(
                question
                    .options
                    .iter()
                    .any(|o| o.id == question.correct_option_id)
            );
            assert!(!question.answer.is_empty());
            assert!(!question.explanation.is_empty());
        }
    }

    #[test]
    fn test_unknown_topic_uses_default() {
        let fallback = mcq("quantum_basket_weaving");
        let default = mcq(DEFAULT_TOPIC);
        assert_eq!(fallback.question, default.question);
        assert_eq!(
            free_text("quantum_basket_weaving").question,
            free_text(DEFAULT_TOPIC).question
        );
    }
}
