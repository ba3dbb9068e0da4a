//! Starter question bank.
//!
//! A fresh deployment has no stored questions and the AI generator may be
//! unconfigured, so the server seeds a small multiple-choice bank per
//! topic on first startup. Seeding is skipped once any question exists.

use sqlx::PgPool;

use crate::models::{NewQuestion, QuestionOption};
use crate::repositories::questions;

struct SeedQuestion {
    topic: &'static str,
    difficulty: f64,
    question: &'static str,
    options: [&'static str; 4],
    correct_option_id: i32,
    explanation: &'static str,
}

const SEED_QUESTIONS: &[SeedQuestion] = &[
    SeedQuestion {
        topic: "python_basics",
        difficulty: 1.0,
        question: "What is the correct way to create a list in Python?",
        options: [
            "my_list = [1, 2, 3, 4]",
            "my_list = (1, 2, 3, 4)",
            "my_list = {1, 2, 3, 4}",
            "my_list = <1, 2, 3, 4>",
        ],
        correct_option_id: 1,
        explanation: "Lists in Python are created using square brackets []. Parentheses () create tuples, curly braces {} create sets, and angle brackets <> are not used for collections.",
    },
    SeedQuestion {
        topic: "python_basics",
        difficulty: 1.0,
        question: "What keyword is used to create a function in Python?",
        options: ["function", "def", "func", "define"],
        correct_option_id: 2,
        explanation: "The 'def' keyword is used to define a function in Python. It stands for 'define' and is followed by the function name and parameters.",
    },
    SeedQuestion {
        topic: "python_basics",
        difficulty: 1.5,
        question: "Which of the following is a mutable data type in Python?",
        options: ["tuple", "string", "list", "frozenset"],
        correct_option_id: 3,
        explanation: "Lists are mutable, meaning their elements can be changed after creation. Tuples, strings, and frozensets are immutable.",
    },
    SeedQuestion {
        topic: "web_security",
        difficulty: 1.5,
        question: "What does CSRF stand for?",
        options: [
            "Cross-Site Request Forgery",
            "Cross-Server File Response",
            "Cryptographic Security Request Format",
            "Central Site Resource Filter",
        ],
        correct_option_id: 1,
        explanation: "CSRF (Cross-Site Request Forgery) is a security vulnerability where an attacker tricks a user into performing unwanted actions on another website.",
    },
    SeedQuestion {
        topic: "web_security",
        difficulty: 1.5,
        question: "What is the primary purpose of HTTPS?",
        options: [
            "To speed up web browsing",
            "To encrypt data in transit and verify server identity",
            "To prevent DDoS attacks",
            "To reduce bandwidth usage",
        ],
        correct_option_id: 2,
        explanation: "HTTPS encrypts data between the client and server, and uses SSL/TLS certificates to verify the server's identity, ensuring secure communication.",
    },
    SeedQuestion {
        topic: "networking",
        difficulty: 1.5,
        question: "Which layer of the OSI model is responsible for routing?",
        options: [
            "Layer 2 - Data Link",
            "Layer 3 - Network",
            "Layer 4 - Transport",
            "Layer 5 - Session",
        ],
        correct_option_id: 2,
        explanation: "The Network layer (Layer 3) is responsible for routing packets between networks using IP addresses.",
    },
    SeedQuestion {
        topic: "networking",
        difficulty: 1.0,
        question: "What does DNS primarily translate?",
        options: [
            "IP addresses to MAC addresses",
            "Domain names to IP addresses",
            "Ports to protocols",
            "URLs to file paths",
        ],
        correct_option_id: 2,
        explanation: "DNS (Domain Name System) resolves human-readable domain names into the IP addresses clients use to reach servers.",
    },
    SeedQuestion {
        topic: "linux_security",
        difficulty: 2.0,
        question: "What is the chmod value for read, write, execute for owner (7)?",
        options: ["4 + 2 + 1", "2 + 1 + 4", "4 + 1 + 2", "All of the above"],
        correct_option_id: 4,
        explanation: "The chmod value 7 represents read (4) + write (2) + execute (1) permissions. All options show the same permissions in different order.",
    },
    SeedQuestion {
        topic: "linux_security",
        difficulty: 1.5,
        question: "Which file stores hashed user passwords on modern Linux systems?",
        options: ["/etc/passwd", "/etc/shadow", "/etc/group", "/etc/login.defs"],
        correct_option_id: 2,
        explanation: "/etc/shadow holds the password hashes and is readable only by root; /etc/passwd kept them historically but now stores account metadata.",
    },
    SeedQuestion {
        topic: "cryptography",
        difficulty: 1.5,
        question: "Which algorithm is most commonly used for symmetric encryption?",
        options: ["RSA", "AES", "SHA-256", "ECDSA"],
        correct_option_id: 2,
        explanation: "AES (Advanced Encryption Standard) is the most widely used symmetric encryption algorithm. RSA and ECDSA are asymmetric, and SHA-256 is a hash function.",
    },
    SeedQuestion {
        topic: "cryptography",
        difficulty: 2.0,
        question: "What property distinguishes a hash function from encryption?",
        options: [
            "Hashes are reversible with the right key",
            "Hashes are one-way and produce fixed-size output",
            "Hashes require a shared secret",
            "Hashes are only used for passwords",
        ],
        correct_option_id: 2,
        explanation: "A cryptographic hash is a one-way function with fixed-size output; encryption is reversible by design given the correct key.",
    },
    SeedQuestion {
        topic: "incident_response",
        difficulty: 1.5,
        question: "What is the first step in incident response?",
        options: ["Detection", "Analysis", "Remediation", "Recovery"],
        correct_option_id: 1,
        explanation: "Detection is the first phase of incident response where security tools and monitoring systems identify security incidents.",
    },
    SeedQuestion {
        topic: "incident_response",
        difficulty: 2.0,
        question: "Why is containment performed before eradication?",
        options: [
            "It is cheaper",
            "It stops the incident from spreading while evidence is preserved",
            "Eradication requires management approval",
            "Containment deletes the attacker's tools",
        ],
        correct_option_id: 2,
        explanation: "Containment limits the blast radius first; eradication then removes the root cause once the incident can no longer spread.",
    },
];

/// Insert the starter bank if the questions table is empty.
///
/// Returns the number of questions inserted (0 when the bank already has
/// content).
pub async fn seed_questions(pool: &PgPool) -> anyhow::Result<usize> {
    if questions::count(pool).await? > 0 {
        return Ok(0);
    }

    let mut inserted = 0;
    for seed in SEED_QUESTIONS {
        let options: Vec<QuestionOption> = seed
            .options
            .iter()
            .enumerate()
            .map(|(i, text)| QuestionOption {
                id: i as i32 + 1,
                text: (*text).to_string(),
            })
            .collect();
        let correct_answer = options
            .iter()
            .find(|o| o.id == seed.correct_option_id)
            .map(|o| o.text.clone())
            .unwrap_or_default();

        questions::insert(
            pool,
            NewQuestion {
                created_by: None,
                topic: seed.topic.to_string(),
                difficulty: seed.difficulty,
                question_text: seed.question.to_string(),
                correct_answer,
                options: Some(options),
                correct_option_id: Some(seed.correct_option_id),
                explanation: seed.explanation.to_string(),
            },
        )
        .await?;
        inserted += 1;
    }

    Ok(inserted)
}
