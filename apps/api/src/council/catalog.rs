//! Static reference data: sectors, council personas, career paths,
//! coaching questions and wellbeing tips.
//!
//! Loaded once at startup (built in, or from a JSON file) and carried in
//! `AppState` as `Arc<Catalog>`. Nothing mutates it after startup.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::prompts::FALLBACK_PERSONA;

/// The role whose output summarizes the council instead of reviewing.
pub const SYNTHESIS_ROLE: &str = "Synthesizer";

/// One selectable industry and the council that reviews for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectorProfile {
    pub name: String,
    pub council: Vec<String>,
    pub career_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub sectors: Vec<SectorProfile>,
    pub personas: BTreeMap<String, String>,
    pub questions: Vec<String>,
    pub mental_health_tips: String,
}

impl Catalog {
    /// Reads a catalog from a JSON file and validates it.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let catalog: Catalog = serde_json::from_str(&raw)
            .with_context(|| format!("Catalog file {} is not valid JSON", path.display()))?;
        catalog.validate()?;
        info!(
            "Loaded catalog from {} ({} sectors)",
            path.display(),
            catalog.sectors.len()
        );
        Ok(catalog)
    }

    /// Rejects catalogs the pipeline cannot run against. Roles without a
    /// persona are allowed; they get the fallback persona.
    pub fn validate(&self) -> Result<()> {
        if self.sectors.is_empty() {
            bail!("Catalog must define at least one sector");
        }
        for (i, sector) in self.sectors.iter().enumerate() {
            if sector.council.is_empty() {
                bail!("Sector '{}' has an empty council", sector.name);
            }
            if self.sectors[..i].iter().any(|s| s.name == sector.name) {
                bail!("Sector '{}' is defined twice", sector.name);
            }
            for role in &sector.council {
                if role != SYNTHESIS_ROLE && !self.personas.contains_key(role) {
                    warn!(
                        "Role '{role}' in sector '{}' has no persona; fallback will be used",
                        sector.name
                    );
                }
            }
        }
        if self.questions.is_empty() {
            bail!("Catalog must define at least one coaching question");
        }
        Ok(())
    }

    pub fn sector(&self, name: &str) -> Option<&SectorProfile> {
        self.sectors.iter().find(|s| s.name == name)
    }

    pub fn sector_names(&self) -> Vec<&str> {
        self.sectors.iter().map(|s| s.name.as_str()).collect()
    }

    /// Persona text for a role, or the generic reviewer persona.
    pub fn persona(&self, role: &str) -> &str {
        self.personas
            .get(role)
            .map(String::as_str)
            .unwrap_or(FALLBACK_PERSONA)
    }

    /// The built-in catalog (UK 2026 salary estimates).
    pub fn builtin() -> Self {
        let sectors = SECTORS
            .iter()
            .map(|(name, council, career_path)| SectorProfile {
                name: name.to_string(),
                council: council.iter().map(|r| r.to_string()).collect(),
                career_path: career_path.to_string(),
            })
            .collect();
        let personas = PERSONAS
            .iter()
            .map(|(role, persona)| (role.to_string(), persona.to_string()))
            .collect();

        Catalog {
            sectors,
            personas,
            questions: TARGETED_QUESTIONS.iter().map(|q| q.to_string()).collect(),
            mental_health_tips: MENTAL_HEALTH_TIPS.to_string(),
        }
    }
}

const SECTORS: &[(&str, &[&str], &str)] = &[
    (
        "Technology",
        &["CEO", "CTO", "HR Director", "Team Lead", "Devil's Advocate", "Career Coach", "Synthesizer"],
        "Junior (£35k–£50k) → Mid (£60k–£90k) → Senior/Lead (£100k+) → CTO (£150k+). Focus: Coding, cloud, AI skills.",
    ),
    (
        "Healthcare",
        &["Service Director", "Clinical Lead", "HR Manager", "Team Supervisor", "Devil's Advocate", "Career Advisor", "Synthesizer"],
        "Band 3–4 (£24k–£30k) → Band 5–7 (£30k–£46k) → Band 8+ (£50k–£70k+). NHS pensions excellent.",
    ),
    (
        "Finance",
        &["CFO", "Compliance Officer", "HR Director", "Department Head", "Devil's Advocate", "Career Coach", "Synthesizer"],
        "Analyst (£40k–£60k) → Manager (£70k–£100k) → Director/CFO (£120k+). CFA/ACCA valuable.",
    ),
    (
        "Education",
        &["Headteacher", "Curriculum Lead", "HR Manager", "Department Coordinator", "Devil's Advocate", "Career Advisor", "Synthesizer"],
        "TA (£23k–£30k) → Teacher (£33k–£51k) → Head (£60k+). PGCE required.",
    ),
    (
        "Marketing",
        &["CMO", "Digital Lead", "HR Director", "Campaign Manager", "Devil's Advocate", "Career Coach", "Synthesizer"],
        "Executive (£28k–£40k) → Manager (£45k–£70k) → Director/CMO (£80k+). Portfolio key.",
    ),
    (
        "Sales",
        &["Sales Director", "Account Manager", "HR Manager", "Team Lead", "Devil's Advocate", "Career Coach", "Synthesizer"],
        "SDR (£30k–£45k) → AE (£60k–£90k OTE) → Director (£120k+ OTE). Quota attainment critical.",
    ),
    (
        "Creative",
        &["Creative Director", "Art Director", "HR Manager", "Project Manager", "Devil's Advocate", "Career Coach", "Synthesizer"],
        "Junior (£25k–£35k) → Mid (£40k–£60k) → Director (£70k+). Strong portfolio essential.",
    ),
];

const PERSONAS: &[(&str, &str)] = &[
    ("CEO", "You are a visionary CEO focused on growth, leadership, and cultural fit."),
    ("CTO", "You are a technical CTO prioritizing skills, innovation, and scalability."),
    ("Service Director", "You are a healthcare leader focused on patient outcomes and NHS values."),
    ("Clinical Lead", "You are a clinical expert emphasizing safety and evidence-based practice."),
    ("CFO", "You are a CFO focused on financial acumen and risk management."),
    ("CMO", "You are a CMO focused on brand, creativity, and market impact."),
    ("HR Director", "You are an HR leader focused on culture, diversity, and fit."),
    ("HR Manager", "You are an HR manager focused on culture, diversity, and fit."),
    ("Team Lead", "You are a hands-on manager focused on daily impact and teamwork."),
    ("Devil's Advocate", "You are the Devil's Advocate — challenge assumptions and highlight risks."),
    ("Career Coach", "You are a supportive career coach giving realistic, encouraging advice."),
    ("Career Advisor", "You are a supportive career advisor giving realistic, encouraging advice."),
    ("Synthesizer", "You are an impartial synthesizer delivering balanced final insights."),
];

const TARGETED_QUESTIONS: &[&str] = &[
    "What keywords from the job posting are missing in my CV?",
    "Suggest 3 improved bullet points for my top experience.",
    "How should I tailor my personal statement?",
    "What red flags might recruiters see — and how to fix them?",
    "What smart questions should I ask in interview?",
    "Cover letter: yes/no and key points to include?",
    "On a 1–10 scale, how strong is my application right now?",
];

const MENTAL_HEALTH_TIPS: &str = "
**Mental Health Tips for Job Seekers**
1. Take regular breaks — job hunting is a marathon.
2. Practice mindfulness or short walks to reduce stress.
3. Talk to friends or a professional if feeling overwhelmed.
4. Celebrate small wins like sending an application.
";
