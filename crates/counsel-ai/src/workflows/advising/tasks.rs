use super::domain::AdvisingStage;

/// Static template for one generated task.
#[derive(Debug, Clone, Copy)]
pub struct TaskTemplate {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub stage: AdvisingStage,
}

/// Application-prep checklist regenerated whenever a university is locked.
/// Every task is bound to the locked university by the caller.
pub fn application_prep_templates() -> Vec<TaskTemplate> {
    vec![
        TaskTemplate {
            key: "application_sop",
            title: "Complete Statement of Purpose",
            description:
                "Draft your SOP highlighting why this university aligns with your goals.",
            stage: AdvisingStage::Application,
        },
        TaskTemplate {
            key: "application_recommendations",
            title: "Gather Recommendation Letters",
            description:
                "Request 2-3 letters from professors or supervisors who know your work well.",
            stage: AdvisingStage::Application,
        },
        TaskTemplate {
            key: "application_transcripts",
            title: "Prepare Official Transcripts",
            description: "Get official transcripts from your institution, sealed and stamped.",
            stage: AdvisingStage::Application,
        },
        TaskTemplate {
            key: "application_deadlines",
            title: "Check Application Deadlines",
            description:
                "Verify all deadlines for this university and set calendar reminders.",
            stage: AdvisingStage::Application,
        },
        TaskTemplate {
            key: "application_financials",
            title: "Prepare Financial Documents",
            description:
                "Gather bank statements and financial proof for the visa application.",
            stage: AdvisingStage::Application,
        },
        TaskTemplate {
            key: "application_tests",
            title: "Complete Standardized Tests",
            description:
                "Ensure GRE/GMAT and IELTS/TOEFL scores meet university requirements.",
            stage: AdvisingStage::Application,
        },
        TaskTemplate {
            key: "application_resume",
            title: "Prepare Resume/CV",
            description:
                "Update your resume highlighting relevant experience and achievements.",
            stage: AdvisingStage::Application,
        },
    ]
}
