mod common;

use nameforge::numerology::{score, Fortune, GridReport, RankTable, StrokePair, MAX_CODE, MAX_RANK};
use rstest::rstest;

#[rstest]
#[case::single_single(11, 0, 8, 0, 44)]
#[case::single_double(11, 0, 12, 10, 82)]
#[case::single_double_repeat(11, 0, 12, 12, 81)]
#[case::double_single(15, 12, 4, 0, 59)]
#[case::double_single_alt(10, 11, 8, 0, 77)]
fn test_known_ranks(
    #[case] f0: u8,
    #[case] f1: u8,
    #[case] g0: u8,
    #[case] g1: u8,
    #[case] expected: u8,
) {
    assert_eq!(score(f0, f1, g0, g1), expected);
}

#[test]
fn test_grid_report_matches_score() {
    let r = GridReport::evaluate(10, 11, 8, 4);
    assert_eq!(r.rank, score(10, 11, 8, 4));
    assert_ne!(r.heaven, Fortune::Unknown);
    assert_ne!(r.three_talents, Fortune::Unknown);
}

#[test]
fn test_every_family_bucket_partitions_given_domain() {
    let table = common::shared_table();

    for family in StrokePair::all() {
        let buckets = table.ranks_for(family).expect("in-domain family");
        assert_eq!(buckets.total(), MAX_CODE as usize, "family {}", family);

        // Each given pair lands in exactly the bucket of its own score.
        for rank in 0..=MAX_RANK {
            for g in buckets.pairs(rank) {
                assert_eq!(
                    score(family.primary, family.secondary, g.primary, g.secondary),
                    rank
                );
            }
        }
    }
}

#[test]
fn test_bucket_order_is_primary_then_secondary() {
    let table = common::shared_table();

    for family in StrokePair::all() {
        let buckets = table.ranks_for(family).expect("in-domain family");
        for (rank, _) in buckets.iter_desc() {
            let pairs: Vec<StrokePair> = buckets.pairs(rank).collect();
            // StrokePair orders by primary, then secondary.
            assert!(
                pairs.windows(2).all(|w| w[0] < w[1]),
                "family {} rank {}",
                family,
                rank
            );
        }
    }

    let zhang = table.ranks_for_strokes(11, 0).unwrap();
    assert_eq!(zhang.top_rank(), Some(91));
    let best: Vec<(u8, u8)> = zhang.pairs(91).map(|g| (g.primary, g.secondary)).collect();
    assert_eq!(best, vec![(12, 40), (22, 30)]);
}

#[test]
fn test_single_given_human_grid_is_last_family_stroke() {
    assert_eq!(GridReport::evaluate(11, 0, 8, 0).grids.human, 11);
    assert_eq!(GridReport::evaluate(10, 11, 8, 0).grids.human, 11);
    assert_eq!(GridReport::evaluate(11, 0, 8, 4).grids.human, 19);
    assert_eq!(GridReport::evaluate(10, 11, 8, 4).grids.human, 19);
}

#[test]
fn test_out_of_domain_family_has_no_buckets() {
    let table = common::shared_table();
    assert!(table.ranks_for_strokes(41, 0).is_none());
    assert!(table.ranks_for_strokes(0, 3).is_none());
    assert!(table.ranks_for_strokes(12, 41).is_none());
    assert!(table.ranks_for_strokes(40, 40).is_some());
}

#[test]
fn test_rebuild_is_identical() {
    let shared = common::shared_table();
    let fresh = RankTable::build();
    assert_eq!(*shared, fresh);
}
