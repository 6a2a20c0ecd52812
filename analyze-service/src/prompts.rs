//! Instruction templates sent to the text-generation provider.
//!
//! The templates describe a terminal-style report for the model to imitate.
//! Nothing here parses or checks what the model sends back.

use std::fmt;

const USERNAME_PLACEHOLDER: &str = "{username}";

const BEHAVIORAL_TEMPLATE: &str = r#"You are the "Behavioral ML Engine" built by Hriday Das.
The user has entered a suspect social media username: {username}.
Generate a highly realistic, simulated behavioral analysis for this specific username.
Format your response EXACTLY like this terminal output:

> ML MODEL INITIATED
> SCANNING USERNAME: {username}
> EXTRACTING NEURAL BEHAVIORAL PATTERNS...
-----------------------------------
[!] SYNTHETIC PROBABILITY: [Generate a % between 0-100 based on how suspicious the username sounds]
[!] BEHAVIORAL ENTROPY: [Low / Medium / High]

>> ML PREDICTIONS FOR {username}:
- Est. Account Age: [Generate a random realistic timeframe]
- Automation Level: [e.g., High - Likely Python/Selenium bot]
- Engagement Authenticity: [e.g., 2% Real, 98% Farmed]

>> BEHAVIORAL ANOMALIES DETECTED:
1. [Make up a realistic behavioral flag, e.g., "Posts exactly every 4 hours"]
2. [Make up a stylometric flag, e.g., "High usage of copy-pasted cryptocurrency links"]
-----------------------------------
> ML ANALYSIS COMPLETE."#;

const OSINT_TEMPLATE: &str = r#"You are the "Cyber Forensic OSINT Engine" built by Prosenjit Singha.
The user has entered a suspect social media username: {username}.
Generate a highly realistic, simulated OSINT background check for this specific username.
Format your response EXACTLY like this terminal output:

> FORENSIC OSINT AUDIT INITIATED
> TARGET ACQUIRED: {username}
> QUERYING METADATA AND GRAPH NODES...
-----------------------------------
[!] THREAT STATUS: [CONFIRMED FAKE / SUSPICIOUS / VERIFIED]

>> EXTRACTED TELEMETRY FOR {username}:
- Hidden UID Creation Date: [Generate a specific past date/time, e.g., 2023-11-12 14:02:11 UTC]
- Geo-Temporal Origin: [Generate a specific location, e.g., Originating IP block traces to Lagos, Nigeria]
- Clone Status: [e.g., YES - Mimicking a verified profile]

>> FORENSIC EVIDENCE:
1. [Make up a realistic metadata flaw, e.g., "Profile image traces back to a 2018 stock photo site"]
2. [Make up a graph theory flaw, e.g., "Follower network shows 0 mutual connections (Linear Graph)"]

>> RECOMMENDED ACTION: Escalate to Grievance Officer via Section 79.
-----------------------------------
> FORENSIC AUDIT COMPLETE."#;

/// Which report the model is asked to imitate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Behavioral ML analysis, selected by `type == "ml"`.
    Behavioral,
    /// Forensic OSINT audit, the fallback for every other `type`.
    Osint,
}

impl AnalysisMode {
    pub fn from_type(kind: Option<&str>) -> Self {
        match kind {
            Some("ml") => AnalysisMode::Behavioral,
            _ => AnalysisMode::Osint,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Behavioral => "ml",
            AnalysisMode::Osint => "osint",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            AnalysisMode::Behavioral => BEHAVIORAL_TEMPLATE,
            AnalysisMode::Osint => OSINT_TEMPLATE,
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// System and user turns for a single provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn new(mode: AnalysisMode, username: &str) -> Self {
        Self {
            system: system_prompt(mode, username),
            user: user_prompt(username),
        }
    }
}

pub fn system_prompt(mode: AnalysisMode, username: &str) -> String {
    mode.template().replace(USERNAME_PLACEHOLDER, username)
}

pub fn user_prompt(username: &str) -> String {
    format!("Analyze the username: {}", username)
}
