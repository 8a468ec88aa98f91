use std::io::Cursor;

use super::common::*;
use crate::workflows::advising::catalog::UniversityCatalog;
use crate::workflows::advising::domain::{Competitiveness, UniversityId};
use crate::workflows::advising::repository::UniversityDirectory;

const SAMPLE_CSV: &str = "\
name,country,rank,estimated_tuition_usd
Massachusetts Institute of Technology,United States,1,40000
University of Toronto,Canada,21,25000
Example State University,usa,51-100,32000
Open Plains College,United States,601+,18000
Unranked Institute,UK,,30000
";

#[test]
fn csv_rows_load_with_bands_and_aliases_resolved() {
    let catalog = UniversityCatalog::from_reader(Cursor::new(SAMPLE_CSV)).expect("catalog loads");
    assert_eq!(catalog.len(), 5);

    let rows = catalog
        .fetch_by_ids(&[
            UniversityId(1),
            UniversityId(3),
            UniversityId(4),
            UniversityId(5),
        ])
        .expect("fetch by ids");

    assert_eq!(rows[0].rank, Some(1));
    assert_eq!(rows[0].competitiveness, Competitiveness::High);

    // banded rank keeps its leading bound; the alias country canonicalizes
    assert_eq!(rows[1].rank, Some(51));
    assert_eq!(rows[1].competitiveness, Competitiveness::Medium);
    assert_eq!(rows[1].country, "United States");

    assert_eq!(rows[2].rank, Some(601));
    assert_eq!(rows[2].competitiveness, Competitiveness::VeryLow);

    assert_eq!(rows[3].rank, None);
    assert_eq!(rows[3].country, "United Kingdom");
}

#[test]
fn criteria_fetch_sorts_rank_ascending_with_unranked_last() {
    let catalog = seeded_catalog();
    let pool = catalog
        .fetch_by_criteria(&["United States".to_string()], Some(50_000), 30)
        .expect("fetch succeeds");

    let ranks: Vec<Option<u32>> = pool.iter().map(|university| university.rank).collect();
    assert_eq!(
        ranks,
        vec![
            Some(10),
            Some(30),
            Some(60),
            Some(90),
            Some(150),
            Some(400),
            None
        ]
    );
}

#[test]
fn criteria_fetch_applies_cost_ceiling_and_limit() {
    let catalog = seeded_catalog();

    let capped = catalog
        .fetch_by_criteria(&["United States".to_string()], Some(30_000), 30)
        .expect("fetch succeeds");
    assert!(capped
        .iter()
        .all(|university| university.estimated_tuition_usd <= 30_000));

    let limited = catalog
        .fetch_by_criteria(&["United States".to_string()], None, 3)
        .expect("fetch succeeds");
    assert_eq!(limited.len(), 3);
}

#[test]
fn criteria_fetch_normalizes_the_requested_country() {
    let catalog = seeded_catalog();
    let via_alias = catalog
        .fetch_by_criteria(&["usa".to_string()], None, 30)
        .expect("fetch succeeds");
    let canonical = catalog
        .fetch_by_criteria(&["United States".to_string()], None, 30)
        .expect("fetch succeeds");
    assert_eq!(via_alias, canonical);
}

#[test]
fn no_matches_is_an_empty_vec_not_an_error() {
    let catalog = seeded_catalog();
    let pool = catalog
        .fetch_by_criteria(&["Japan".to_string()], Some(10_000), 30)
        .expect("fetch succeeds");
    assert!(pool.is_empty());
}

#[test]
fn unknown_ids_are_skipped() {
    let catalog = seeded_catalog();
    let rows = catalog
        .fetch_by_ids(&[UniversityId(1), UniversityId(404)])
        .expect("fetch succeeds");
    assert_eq!(rows.len(), 1);
}
