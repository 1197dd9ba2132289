//! Report Assembler. Concatenates every produced block into the
//! downloadable plain-text report. No content is transformed.

use crate::council::auxiliary::QuestionAnswer;
use crate::council::orchestrator::FeedbackItem;
use crate::llm_client::StepOutcome;

pub const REPORT_FILE_NAME: &str = "unleash_career_report.txt";
pub const REPORT_MIME: &str = "text/plain";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Feedback,
    FinalRecommendation,
    LinkedinAnalysis,
    Question,
    CareerPath,
    MentalHealthTips,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub heading: String,
    pub body: String,
}

impl ReportSection {
    fn new(kind: SectionKind, heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            heading: heading.into(),
            body: body.into(),
        }
    }

    fn render(&self) -> String {
        match self.kind {
            SectionKind::Feedback => format!("{}:\n{}\n", self.heading, self.body),
            SectionKind::FinalRecommendation
            | SectionKind::LinkedinAnalysis
            | SectionKind::Question => format!("\n{}:\n{}", self.heading, self.body),
            SectionKind::CareerPath | SectionKind::MentalHealthTips => {
                format!("{}:\n{}", self.heading, self.body)
            }
        }
    }
}

/// Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    sections: Vec<ReportSection>,
}

/// Everything the assembler needs, borrowed from the finished pipeline.
pub struct ReportInputs<'a> {
    pub feedback: &'a [FeedbackItem],
    pub synthesis: &'a StepOutcome,
    pub linkedin: Option<&'a StepOutcome>,
    pub answers: &'a [QuestionAnswer],
    pub career_path: &'a str,
    pub mental_health_tips: &'a str,
}

impl Report {
    /// Fixed order: feedback, final recommendation, LinkedIn, questions,
    /// career path, mental-health tips.
    pub fn assemble(inputs: ReportInputs<'_>) -> Self {
        let mut sections = Vec::with_capacity(inputs.feedback.len() + inputs.answers.len() + 4);

        sections.extend(inputs.feedback.iter().map(|item| {
            ReportSection::new(SectionKind::Feedback, &item.role, item.outcome.render())
        }));
        sections.push(ReportSection::new(
            SectionKind::FinalRecommendation,
            "Final Recommendation",
            inputs.synthesis.render(),
        ));
        if let Some(linkedin) = inputs.linkedin {
            sections.push(ReportSection::new(
                SectionKind::LinkedinAnalysis,
                "LinkedIn Analysis",
                linkedin.render(),
            ));
        }
        sections.extend(inputs.answers.iter().map(|answer| {
            ReportSection::new(SectionKind::Question, &answer.question, answer.outcome.render())
        }));
        sections.push(ReportSection::new(
            SectionKind::CareerPath,
            "Career Path",
            inputs.career_path,
        ));
        sections.push(ReportSection::new(
            SectionKind::MentalHealthTips,
            "Mental Health Tips",
            inputs.mental_health_tips,
        ));

        Report { sections }
    }

    #[cfg(test)]
    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    /// The downloadable text: blocks joined by blank lines.
    pub fn render(&self) -> String {
        self.sections
            .iter()
            .map(ReportSection::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
