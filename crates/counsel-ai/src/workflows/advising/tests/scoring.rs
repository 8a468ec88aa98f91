use crate::workflows::advising::domain::{Competitiveness, University, UniversityId};
use crate::workflows::advising::recommendation::fit_score;

fn custom(rank: Option<u32>, competitiveness: Competitiveness, tuition: u32) -> University {
    University {
        id: UniversityId(999),
        name: "Custom".to_string(),
        country: "United States".to_string(),
        rank,
        competitiveness,
        estimated_tuition_usd: tuition,
    }
}

#[test]
fn reach_candidate_over_stretched_budget_scores_seventy_five() {
    // rank 30 -> 40, tuition 50k over the 48k stretch -> 5, gpa 9.0 vs HIGH -> 30
    let university = custom(Some(30), Competitiveness::High, 50_000);
    assert_eq!(fit_score(9.0, 40_000, &university), 75);
}

#[test]
fn best_case_hits_the_ceiling() {
    let university = custom(Some(40), Competitiveness::High, 25_000);
    assert_eq!(fit_score(9.0, 40_000, &university), 100);
}

#[test]
fn worst_case_hits_the_floor() {
    // prestige floor 20, cost floor 5, academic floor 10 for HIGH
    let university = custom(Some(400), Competitiveness::High, 60_000);
    assert_eq!(fit_score(5.0, 20_000, &university), 35);
}

#[test]
fn missing_rank_buckets_at_the_pessimistic_default() {
    let unranked = custom(None, Competitiveness::VeryLow, 10_000);
    let bottom = custom(Some(500), Competitiveness::VeryLow, 10_000);
    assert_eq!(fit_score(7.0, 40_000, &unranked), fit_score(7.0, 40_000, &bottom));
}

#[test]
fn prestige_buckets_follow_rank_thresholds() {
    let expectations = [
        (50, 40u8),
        (51, 35),
        (100, 35),
        (101, 30),
        (200, 30),
        (201, 25),
        (300, 25),
        (301, 20),
    ];
    for (rank, expected_prestige) in expectations {
        // fix cost and academics so only the prestige bucket varies
        let university = custom(Some(rank), Competitiveness::High, 10_000);
        let score = fit_score(9.0, 40_000, &university);
        assert_eq!(
            score,
            expected_prestige + 30 + 30,
            "rank {rank} bucketed wrong"
        );
    }
}

#[test]
fn cost_fit_buckets_follow_budget_ratios() {
    let budget = 10_000;
    let expectations = [(7_000u32, 30u8), (10_000, 25), (12_000, 15), (12_001, 5)];
    for (tuition, expected_cost) in expectations {
        let university = custom(Some(10), Competitiveness::High, tuition);
        let score = fit_score(9.0, budget, &university);
        assert_eq!(score, 40 + expected_cost + 30, "tuition {tuition} bucketed wrong");
    }
}

#[test]
fn academic_fit_depends_on_competitiveness_band() {
    let cases = [
        (Competitiveness::High, 8.5, 30u8),
        (Competitiveness::High, 7.5, 20),
        (Competitiveness::High, 7.4, 10),
        (Competitiveness::Medium, 7.0, 30),
        (Competitiveness::Medium, 6.0, 25),
        (Competitiveness::Medium, 5.9, 15),
        (Competitiveness::Low, 6.0, 30),
        (Competitiveness::Low, 5.9, 25),
        (Competitiveness::VeryLow, 4.0, 25),
    ];
    for (band, gpa, expected_academic) in cases {
        let university = custom(Some(10), band, 5_000);
        let score = fit_score(gpa, 40_000, &university);
        assert_eq!(
            score,
            40 + 30 + expected_academic,
            "band {band:?} with gpa {gpa} bucketed wrong"
        );
    }
}

#[test]
fn score_stays_within_bounds_across_input_grid() {
    let ranks = [None, Some(1), Some(75), Some(250), Some(900)];
    let tuitions = [1_000u32, 25_000, 45_000, 90_000];
    let gpas = [0.0f32, 5.5, 7.2, 9.8];
    let bands = [
        Competitiveness::High,
        Competitiveness::Medium,
        Competitiveness::Low,
        Competitiveness::VeryLow,
    ];

    for rank in ranks {
        for tuition in tuitions {
            for gpa in gpas {
                for band in bands {
                    let university = custom(rank, band, tuition);
                    let score = fit_score(gpa, 30_000, &university);
                    assert!((35..=100).contains(&score), "score {score} out of bounds");
                }
            }
        }
    }
}
