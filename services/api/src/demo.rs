use crate::infra::{default_engine_config, seeded_catalog, InMemoryAdvisingStore};
use clap::Args;
use counsel_ai::error::AppError;
use counsel_ai::workflows::advising::{
    AdvisingService, ProfileDraft, RecommendationEngine, ScoredUniversity,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Email for the demo profile
    #[arg(long, default_value = "demo@counsel.example")]
    pub(crate) email: String,
    /// GPA on the 0-10 scale
    #[arg(long, default_value_t = 8.6)]
    pub(crate) gpa: f32,
    /// Annual budget in USD
    #[arg(long, default_value_t = 40_000)]
    pub(crate) budget: u32,
    /// Preferred country (aliases like USA or UK are accepted)
    #[arg(long, default_value = "USA")]
    pub(crate) country: String,
    /// Stop after recommendations instead of locking a university
    #[arg(long)]
    pub(crate) skip_lock: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        email,
        gpa,
        budget,
        country,
        skip_lock,
    } = args;

    let service = AdvisingService::new(
        Arc::new(seeded_catalog()),
        Arc::new(InMemoryAdvisingStore::default()),
        RecommendationEngine::new(default_engine_config()),
    );

    println!("== Study-abroad advising demo ==");

    let profile = service.upsert_profile(ProfileDraft {
        email,
        name: Some("Demo Applicant".to_string()),
        degree: Some("BTech".to_string()),
        graduation_year: Some(2025),
        gpa: Some(gpa),
        field_of_study: Some("Computer Science".to_string()),
        preferred_countries: Some(vec![country]),
        budget_per_year: Some(budget),
        funding_plan: Some("education loan".to_string()),
        ielts_status: Some("completed".to_string()),
        gre_gmat_status: Some("in progress".to_string()),
        sop_status: Some("drafting".to_string()),
        ..ProfileDraft::default()
    })?;
    let user = profile.id;
    service.complete_profile(user)?;
    let state = service.current_state(user)?;
    println!(
        "profile {} completed, stage: {}",
        profile.email,
        state.current_stage.label()
    );

    let tiers = service.recommendations(user)?;
    print_tier("REACH", &tiers.reach);
    print_tier("TARGET", &tiers.target);
    print_tier("SAFE", &tiers.safe);

    if !skip_lock {
        if let Some(choice) = tiers.target.first().or_else(|| tiers.reach.first()) {
            let university = &choice.university;
            service.add_to_shortlist(user, university.id, Some(choice.tier))?;
            service.lock_university(user, university.id)?;
            println!("\nlocked: {} ({})", university.name, university.country);

            println!("application checklist:");
            for task in service.tasks(user)? {
                println!("  [ ] {} - {}", task.title, task.description);
            }
        } else {
            println!("\nno candidates available to lock");
        }
    }

    let strength = service.profile_strength(user)?;
    println!("\nprofile strength: {}/100", strength.overall_score);
    for section in &strength.sections {
        println!(
            "  {:<22} {:>2}/{:<2} {}",
            section.section.label(),
            section.earned,
            section.possible,
            section.status.label()
        );
    }
    if !strength.next_actions.is_empty() {
        println!("next actions:");
        for action in &strength.next_actions {
            println!("  - {action}");
        }
    }

    Ok(())
}

fn print_tier(label: &str, entries: &[ScoredUniversity]) {
    println!("\n{label} ({}):", entries.len());
    for scored in entries {
        let rank = scored
            .university
            .rank
            .map(|rank| rank.to_string())
            .unwrap_or_else(|| "unranked".to_string());
        println!(
            "  {:<38} rank {:<9} ${:<6} match {}%",
            scored.university.name, rank, scored.university.estimated_tuition_usd, scored.match_percentage
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_pipeline_runs_end_to_end() {
        run_demo(DemoArgs {
            email: "demo-test@counsel.example".to_string(),
            gpa: 8.6,
            budget: 40_000,
            country: "USA".to_string(),
            skip_lock: false,
        })
        .expect("demo completes");
    }
}
